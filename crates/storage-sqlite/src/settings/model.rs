//! Database model for settings rows.

use diesel::prelude::*;
use localset_core::SettingRecord;
use serde::{Deserialize, Serialize};

/// Database model for one `(key, value)` settings row
#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::settings)]
#[serde(rename_all = "camelCase")]
pub struct SettingDB {
    pub key: String,
    pub value: String,
}

impl From<SettingDB> for SettingRecord {
    fn from(db: SettingDB) -> Self {
        SettingRecord {
            key: db.key,
            value: db.value,
        }
    }
}
