use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::math::integration::integratorconfiguration::IntegratorConfiguration;
use crate::math::integration::integratorconfigurationmanager::IntegratorConfigurationManager;

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    integrator: Vec<serde_json::Value>
}

/// 設定檔的頂層：`{"integrator": [ {...}, ... ]}`
pub struct Configuration {
    integrator_configuration_manager_cell: RefCell<Manager<IntegratorConfiguration>>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            integrator_configuration_manager_cell: RefCell::new(IntegratorConfigurationManager::new())
        }
    }

    pub fn integrator_configuration_manager(&self) -> RefMut<'_, Manager<IntegratorConfiguration>> {
        self.integrator_configuration_manager_cell.borrow_mut()
    }

    pub fn from_reader<P: AsRef<Path>>(&self, file_path: P) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.insert_json_prop(json_prop)
    }

    pub fn from_json_value(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        self.insert_json_prop(json_prop)
    }

    fn insert_json_prop(&self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        let integrator_configuration_manager = self.integrator_configuration_manager_cell.borrow_mut();
        integrator_configuration_manager.insert_obj_from_json_vec(&json_prop.integrator)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn integrators_section_is_loaded() {
        let config = Configuration::new();
        config
            .from_json_value(json!({
                "integrator": [
                    {"name": "Default", "algorithm": "GaussKronrod"}
                ]
            }))
            .unwrap();
        assert!(config.integrator_configuration_manager().get("Default").is_ok());
    }

    #[test]
    fn empty_document_is_accepted() {
        let config = Configuration::new();
        config.from_json_value(json!({})).unwrap();
        assert!(config.integrator_configuration_manager().is_empty());
    }
}
