use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::SettingDB;
use crate::db::{get_connection, DbPool};
use crate::errors::IntoCore;
use crate::schema::settings;
use localset_core::errors::Result;
use localset_core::{RecordStoreTrait, SettingRecord};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        SettingsRepository { pool }
    }
}

impl RecordStoreTrait for SettingsRepository {
    fn find_by_key(&self, key_param: &str) -> Result<Option<SettingRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let row = settings::table
            .filter(settings::key.eq(key_param))
            .select((settings::key, settings::value))
            .first::<SettingDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(SettingRecord::from))
    }

    fn update_or_create(&self, key_param: &str, value_param: &str) -> Result<SettingRecord> {
        let row = SettingDB {
            key: key_param.to_string(),
            value: value_param.to_string(),
        };

        let mut conn = get_connection(&self.pool)?;
        conn.immediate_transaction::<_, diesel::result::Error, _>(|c| {
            diesel::replace_into(settings::table)
                .values(&row)
                .execute(c)
        })
        .into_core()?;
        debug!("Stored setting '{}'", key_param);

        Ok(row.into())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        settings::table
            .select(settings::key)
            .order(settings::key.asc())
            .load::<String>(&mut conn)
            .into_core()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations};
    use localset_core::{setting, SettingMap, SettingValue, SettingsService};
    use tempfile::tempdir;

    /// Creates a test repository backed by a temp database
    /// Returns the repository and temp dir (to keep it alive)
    fn create_test_repository() -> (Arc<SettingsRepository>, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        (Arc::new(SettingsRepository::new(pool)), temp_dir)
    }

    #[test]
    fn test_find_missing_key_is_none() {
        let (repo, _temp_dir) = create_test_repository();
        assert_eq!(repo.find_by_key("never_saved").unwrap(), None);
    }

    #[test]
    fn test_update_or_create_inserts_then_overwrites() {
        let (repo, _temp_dir) = create_test_repository();

        let created = repo.update_or_create("theme", "light").unwrap();
        assert_eq!(created.value, "light");

        repo.update_or_create("theme", "dark").unwrap();
        let found = repo.find_by_key("theme").unwrap().expect("row should exist");
        assert_eq!(found.key, "theme");
        assert_eq!(found.value, "dark");
        assert_eq!(repo.keys().unwrap(), vec!["theme"]);
    }

    #[test]
    fn test_keys_are_sorted() {
        let (repo, _temp_dir) = create_test_repository();
        for key in ["website", "contact", "menu"] {
            repo.update_or_create(key, "{}").unwrap();
        }
        assert_eq!(repo.keys().unwrap(), vec!["contact", "menu", "website"]);
    }

    #[test]
    fn test_value_text_is_stored_verbatim() {
        let (repo, _temp_dir) = create_test_repository();
        let text = "line one\nline \"two\" with 'quotes' and ünïcödé";
        repo.update_or_create("notice", text).unwrap();
        assert_eq!(repo.find_by_key("notice").unwrap().unwrap().value, text);
    }

    #[test]
    fn test_accessor_round_trip_through_sqlite() {
        let (repo, _temp_dir) = create_test_repository();
        let service = SettingsService::new(repo.clone(), "en");

        let items: SettingValue = vec![
            SettingValue::from_iter([(
                "name",
                SettingValue::from_iter([("ar", "name value 1 ar"), ("en", "name value 1 en")]),
            )]),
            SettingValue::from_iter([(
                "name",
                SettingValue::from_iter([("ar", "name value 2 ar"), ("en", "name value 2 en")]),
            )]),
        ]
        .into();
        setting(&service, "single_multiple_language_items", None)
            .unwrap()
            .save(items.clone())
            .unwrap();

        let accessor = setting(&service, "single_multiple_language_items", None).unwrap();
        assert_eq!(accessor.to_value(), items);
        let names: Vec<String> = accessor
            .get()
            .filter_map(|item| item.get_str("name"))
            .collect();
        assert_eq!(names, vec!["name value 1 en", "name value 2 en"]);

        let arabic = setting(&service, "single_multiple_language_items", Some("ar")).unwrap();
        assert_eq!(
            arabic.item(0).and_then(|i| i.get_str("name")).as_deref(),
            Some("name value 1 ar")
        );
    }

    #[test]
    fn test_first_inserted_language_survives_storage() {
        let (repo, _temp_dir) = create_test_repository();
        let service = SettingsService::new(repo, "de");

        // "en" sorts first, but "fr" was inserted first
        let data: SettingValue = SettingMap::from_iter([(
            "title",
            SettingValue::from_iter([("fr", "Bienvenue"), ("en", "Welcome")]),
        )])
        .into();
        setting(&service, "home", None).unwrap().save(data).unwrap();

        assert_eq!(
            setting(&service, "home", None)
                .unwrap()
                .field_str("title")
                .as_deref(),
            Some("Bienvenue")
        );
    }

    #[test]
    fn test_unreachable_database_fails_loudly() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("no_migrations.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        let repo: Arc<dyn RecordStoreTrait> = Arc::new(SettingsRepository::new(pool));

        // Without migrations the table is missing, so the query itself fails.
        let err = localset_core::SettingsAccessor::load(repo, Some("website"), "en").unwrap_err();
        assert!(matches!(
            err,
            localset_core::Error::Database(localset_core::errors::DatabaseError::QueryFailed(_))
        ));
    }
}
