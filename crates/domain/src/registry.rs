//! Registry — the ordered collection of devices a home is made of.
//!
//! Insertion order is display order. Devices are addressed by their
//! 1-based position, never by name, so duplicate names are allowed.

use crate::device::Device;
use crate::error::OutOfRangeError;

/// One row of [`Registry::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// 1-based position in the registry.
    pub index: usize,
    pub name: String,
}

/// Ordered, owning collection of [`Device`]s.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    devices: Vec<Device>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a device at the end of the registry.
    pub fn add(&mut self, device: Device) {
        self.devices.push(device);
    }

    /// 1-based `(index, name)` rows in display order.
    #[must_use]
    pub fn list(&self) -> Vec<Listing> {
        self.devices
            .iter()
            .enumerate()
            .map(|(i, device)| Listing {
                index: i + 1,
                name: device.name().to_string(),
            })
            .collect()
    }

    /// Resolve a 1-based index.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] when `index` is 0 or past the last device.
    pub fn get(&self, index: usize) -> Result<&Device, OutOfRangeError> {
        let position = self.position(index)?;
        Ok(&self.devices[position])
    }

    /// Resolve a 1-based index for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] when `index` is 0 or past the last device.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Device, OutOfRangeError> {
        let position = self.position(index)?;
        Ok(&mut self.devices[position])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.devices.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Device> {
        self.devices.iter_mut()
    }

    fn position(&self, index: usize) -> Result<usize, OutOfRangeError> {
        if index == 0 || index > self.devices.len() {
            return Err(OutOfRangeError {
                what: "device",
                index,
                len: self.devices.len(),
            });
        }
        Ok(index - 1)
    }
}

impl FromIterator<Device> for Registry {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Registry {
    type Item = &'a mut Device;
    type IntoIter = std::slice::IterMut<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
