use serde::Deserialize;

use crate::manager::managererror::ManagerError;
use crate::math::integration::exitcondition::ExitCondition;
use crate::math::integration::gausskronrod::gausskronrodintegrator::GaussKronrodIntegrator;
use crate::math::integration::gausskronrod::gausskronrodtable::GaussKronrodOrder;
use crate::math::integration::gausslobatto::gausslobattointegrator::GaussLobattoIntegrator;
use crate::math::integration::integrator::OneDimensionalIntegrator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IntegratorType {
    GaussKronrod,
    GaussLobatto
}

#[derive(Deserialize)]
struct IntegratorTypedObject {
    algorithm: IntegratorType
}

#[derive(Deserialize)]
struct GaussKronrodJsonProp {
    #[serde(default)]
    order: GaussKronrodOrder,
    #[serde(default)]
    exit_condition: ExitCondition
}

#[derive(Deserialize)]
struct GaussLobattoJsonProp {
    #[serde(default)]
    exit_condition: ExitCondition
}

/// 積分規則 + 停止條件；界與被積函數在取得 integrator 之後才設定
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegratorConfiguration {
    GaussKronrod {
        order: GaussKronrodOrder,
        exit_condition: ExitCondition
    },
    GaussLobatto {
        exit_condition: ExitCondition
    }
}

impl IntegratorConfiguration {
    pub fn integrator_type(&self) -> IntegratorType {
        match self {
            IntegratorConfiguration::GaussKronrod { .. } => IntegratorType::GaussKronrod,
            IntegratorConfiguration::GaussLobatto { .. } => IntegratorType::GaussLobatto
        }
    }

    pub fn exit_condition(&self) -> &ExitCondition {
        match self {
            IntegratorConfiguration::GaussKronrod { exit_condition, .. } => exit_condition,
            IntegratorConfiguration::GaussLobatto { exit_condition } => exit_condition
        }
    }

    /// 產生一個尚未設定界與函數的 integrator
    pub fn integrator(&self) -> Box<dyn OneDimensionalIntegrator> {
        match *self {
            IntegratorConfiguration::GaussKronrod { order, exit_condition } => {
                Box::new(GaussKronrodIntegrator::new(order, exit_condition))
            },
            IntegratorConfiguration::GaussLobatto { exit_condition } => {
                Box::new(GaussLobattoIntegrator::new(exit_condition))
            }
        }
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<IntegratorConfiguration, ManagerError> {
        let typed_object: IntegratorTypedObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
        let configuration = match typed_object.algorithm {
            IntegratorType::GaussKronrod => {
                let json_prop: GaussKronrodJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
                IntegratorConfiguration::GaussKronrod {
                    order: json_prop.order,
                    exit_condition: json_prop.exit_condition
                }
            },
            IntegratorType::GaussLobatto => {
                let json_prop: GaussLobattoJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
                IntegratorConfiguration::GaussLobatto {
                    exit_condition: json_prop.exit_condition
                }
            }
        };
        Ok(configuration)
    }
}

impl Default for IntegratorConfiguration {
    fn default() -> Self {
        IntegratorConfiguration::GaussKronrod {
            order: GaussKronrodOrder::default(),
            exit_condition: ExitCondition::default()
        }
    }
}
