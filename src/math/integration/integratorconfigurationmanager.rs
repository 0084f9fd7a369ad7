use crate::manager::manager::Manager;
use crate::math::integration::integratorconfiguration::IntegratorConfiguration;

pub struct IntegratorConfigurationManager;

impl IntegratorConfigurationManager {
    pub fn new() -> Manager<IntegratorConfiguration> {
        Manager::new(IntegratorConfiguration::from_json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::manager::manager::IManager;
    use crate::manager::managererror::ManagerError;
    use crate::math::integration::integratorconfiguration::IntegratorType;

    #[test]
    fn named_configurations() {
        let manager = IntegratorConfigurationManager::new();
        manager
            .from_json_value(json!([
                {"name": "Kronrod61", "algorithm": "GaussKronrod", "order": 61},
                {"name": "Lobatto", "algorithm": "GaussLobatto", "exit_condition": {"relative_tolerance": 1e-10}}
            ]))
            .unwrap();
        assert_eq!(manager.get("Kronrod61").unwrap().integrator_type(), IntegratorType::GaussKronrod);
        let lobatto = manager.get("Lobatto").unwrap();
        assert_eq!(lobatto.exit_condition().relative_tolerance(), 1e-10);
        assert!(matches!(manager.get("Simpson"), Err(ManagerError::NameNotFoundError(_))));
    }

    #[test]
    fn one_bad_entry_fails_the_load() {
        let manager = IntegratorConfigurationManager::new();
        let result = manager.from_json_value(json!([
            {"name": "Good", "algorithm": "GaussKronrod"},
            {"name": "Bad", "algorithm": "GaussKronrod", "order": 13}
        ]));
        assert!(result.is_err());
        assert!(manager.get("Bad").is_err());
    }
}
