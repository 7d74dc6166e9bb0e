use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

pub const DEFAULT_STATUS: &str = "available";

/// One row of the `ebooks` table. Field names follow the table's column
/// names, which are also the wire contract of the reference deployment.
#[derive(Debug, FromRow, Serialize)]
pub struct Ebook {
    pub id: i32,
    pub titulo: String,
    pub arquivo_path: String,
    pub data_upload: NaiveDateTime,
    pub tamanho: i64,
    pub status: String,
}

/// Read-API projection: `tamanho` and `status` are not part of the payload.
#[derive(Debug, FromRow, Serialize)]
pub struct EbookSummary {
    pub id: i32,
    pub titulo: String,
    pub arquivo_path: String,
    pub data_upload: NaiveDateTime,
}

/// Insert payload for a freshly uploaded file.
#[derive(Debug)]
pub struct NewEbook {
    pub titulo: String,
    pub arquivo_path: String,
    pub data_upload: NaiveDateTime,
    pub tamanho: i64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_serializes_exactly_the_wire_keys() {
        let summary = EbookSummary {
            id: 7,
            titulo: "book.pdf".into(),
            arquivo_path: "uploads/book.pdf".into(),
            data_upload: NaiveDateTime::parse_from_str("2024-05-01 10:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };

        let value = serde_json::to_value(&summary).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["arquivo_path", "data_upload", "id", "titulo"]);
        assert_eq!(object["id"], 7);
        assert_eq!(object["titulo"], "book.pdf");
        // chrono renders NaiveDateTime as an ISO-like string
        assert_eq!(object["data_upload"], "2024-05-01T10:30:00");
    }

    #[test]
    fn full_record_carries_size_and_status() {
        let ebook = Ebook {
            id: 1,
            titulo: "book.epub".into(),
            arquivo_path: "uploads/book.epub".into(),
            data_upload: NaiveDateTime::parse_from_str("2024-05-01 10:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            tamanho: 1024,
            status: DEFAULT_STATUS.into(),
        };

        let value = serde_json::to_value(&ebook).unwrap();
        assert_eq!(value["tamanho"], 1024);
        assert_eq!(value["status"], "available");
    }
}
