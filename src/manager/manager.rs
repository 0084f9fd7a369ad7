use std::cell::{
    RefCell,
    RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::managererror::ManagerError;

/// 每筆物件都必須帶 `name`，其餘欄位交給各自的建構函數
#[derive(Deserialize)]
struct NamedJsonObject {
    name: String
}

/// 以名稱索引的物件表，物件由 JSON 建構
pub trait IManager<V>
where
    V: Clone,
{
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        self.map()
            .get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }

    /// 檔案內容可以是單一物件或物件陣列
    fn from_reader<P: AsRef<Path>>(&self, file_path: P) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        self.from_json_value(json_value)
    }

    fn from_json_value(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}

pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>,
}

impl<V> Manager<V>
where
    V: Clone,
{
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager {
            map_cell: RefCell::new(HashMap::new()),
            get_obj_from_json,
        }
    }

    pub fn len(&self) -> usize {
        self.map_cell.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map_cell.borrow().is_empty()
    }
}

impl<V> IManager<V> for Manager<V>
where
    V: Clone,
{
    fn map(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
        let v = (self.get_obj_from_json)(json_value)?;
        self.map().insert(named_object.name, v);
        Ok(())
    }
}
