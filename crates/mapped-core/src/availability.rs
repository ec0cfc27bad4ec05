//! Availability probes for the optional subsystems.

use crate::engine::MappedTypes;

impl MappedTypes {
    /// Whether a validation registry is installed right now.
    ///
    /// Checked on every call; installing or withdrawing the registry is
    /// visible immediately.
    pub fn is_validation_available(&self) -> bool {
        self.validation().is_available()
    }

    /// Whether a transformation registry is installed right now.
    pub fn is_transformation_available(&self) -> bool {
        self.transformation().is_available()
    }
}
