pub mod output;

use crate::core::Entity;
use crate::errors::ScoreError;
use std::fs;
use std::path::Path;

/// Read an entity batch from a JSON file (an array of entity records).
pub fn read_entities(path: &Path) -> Result<Vec<Entity>, ScoreError> {
    let contents = fs::read_to_string(path).map_err(|source| ScoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|e| ScoreError::parse(path, e.to_string()))
}

pub fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityKind, EntityStatus, VerificationStatus};
    use indoc::indoc;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_entity_batch_from_json_array() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            indoc! {r#"
                [
                  {
                    "id": "T-1001",
                    "name": "Asha Verma",
                    "kind": "tourist",
                    "status": "active",
                    "verification_status": "verified",
                    "active_alert_count": 0,
                    "last_check_in": "2026-08-23T08:00:00Z"
                  },
                  {
                    "id": "Z-07",
                    "name": "Riverfront promenade",
                    "kind": "zone",
                    "status": "emergency",
                    "verification_status": "verified",
                    "active_alert_count": 4,
                    "last_check_in": "2026-08-23T11:00:00Z"
                  }
                ]
            "#}
            .as_bytes(),
        )
        .unwrap();

        let entities = read_entities(file.path()).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].kind, EntityKind::Tourist);
        assert_eq!(entities[0].inputs.status, EntityStatus::Active);
        assert_eq!(
            entities[0].inputs.verification_status,
            VerificationStatus::Verified
        );
        assert_eq!(entities[1].inputs.active_alert_count, 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_entities(Path::new("/nonexistent/entities.json")).unwrap_err();
        assert!(matches!(err, ScoreError::Io { .. }));
    }

    #[test]
    fn invalid_enum_value_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"id":"T-1","name":"x","kind":"tourist","status":"vanished",
                 "verification_status":"verified","active_alert_count":0,
                 "last_check_in":"2026-08-23T08:00:00Z"}]"#,
        )
        .unwrap();

        let err = read_entities(file.path()).unwrap_err();
        assert!(matches!(err, ScoreError::Parse { .. }));
    }
}
