use std::collections::BTreeMap;

use crate::catalog::Collection;
use crate::menu::ButtonGrid;

/// Configuration value recorded for a collection the user chose to skip.
pub const NOT_INSTALLED: &str = "Not Installed";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstallState {
    Installed(String),
    NotInstalled,
}

impl InstallState {
    pub fn from_config_value(value: &str) -> Self {
        if value == NOT_INSTALLED {
            InstallState::NotInstalled
        } else {
            InstallState::Installed(value.to_string())
        }
    }

    pub fn as_config_value(&self) -> &str {
        match self {
            InstallState::Installed(path) => path,
            InstallState::NotInstalled => NOT_INSTALLED,
        }
    }
}

/// Which collections are installed, as recorded in the configuration.
/// Collections without an entry are unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Availability {
    entries: BTreeMap<Collection, InstallState>,
}

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, collection: Collection, state: InstallState) {
        self.entries.insert(collection, state);
    }

    pub fn get(&self, collection: Collection) -> Option<&InstallState> {
        self.entries.get(&collection)
    }
}

/// Whether the buttons of `collection` must be deactivated.
pub fn deactivated(collection: Collection, availability: &Availability) -> bool {
    availability.get(collection) == Some(&InstallState::NotInstalled)
}

/// Forces the buttons of skipped collections into the deactivated state.
/// Idempotent; run after every state change so it always has the last word.
pub fn apply(grid: &mut ButtonGrid, availability: &Availability) {
    for collection in Collection::ALL {
        let off = deactivated(collection, availability);
        for item in collection.items() {
            grid.set_deactivated(item, off);
        }
    }
}
