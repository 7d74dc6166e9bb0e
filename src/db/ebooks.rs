use crate::core::AppError;
use crate::models::ebooks::{Ebook, EbookSummary, NewEbook};
use sqlx::mysql::MySqlConnection;

/// Idempotent: safe to run on every connection.
const CREATE_EBOOKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS ebooks (
        id INT AUTO_INCREMENT PRIMARY KEY,
        titulo VARCHAR(255) NOT NULL,
        arquivo_path VARCHAR(255) NOT NULL,
        data_upload DATETIME NOT NULL,
        tamanho BIGINT NOT NULL,
        status VARCHAR(50) NOT NULL DEFAULT 'available'
    )
"#;

pub async fn create_ebooks_table(conn: &mut MySqlConnection) -> Result<(), AppError> {
    sqlx::query(CREATE_EBOOKS_TABLE)
        .execute(conn)
        .await
        .map_err(AppError::db_error)?;

    Ok(())
}

pub async fn insert_ebook(conn: &mut MySqlConnection, new: &NewEbook) -> Result<i32, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO ebooks (titulo, arquivo_path, data_upload, tamanho, status)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.titulo)
    .bind(&new.arquivo_path)
    .bind(new.data_upload)
    .bind(new.tamanho)
    .bind(&new.status)
    .execute(conn)
    .await
    .map_err(AppError::db_error)?;

    assigned_id(result.last_insert_id())
}

/// MySQL hands back a u64; record ids are INT.
fn assigned_id(raw_id: u64) -> Result<i32, AppError> {
    raw_id.try_into().map_err(AppError::db_error)
}

pub async fn fetch_all_ebooks(conn: &mut MySqlConnection) -> Result<Vec<Ebook>, AppError> {
    let ebooks = sqlx::query_as::<_, Ebook>(
        r#"
        SELECT id, titulo, arquivo_path, data_upload, tamanho, status
        FROM ebooks
        ORDER BY data_upload DESC, id DESC
        "#,
    )
    .fetch_all(conn)
    .await
    .map_err(AppError::db_error)?;

    Ok(ebooks)
}

pub async fn fetch_catalog(conn: &mut MySqlConnection) -> Result<Vec<EbookSummary>, AppError> {
    let catalog = sqlx::query_as::<_, EbookSummary>(
        r#"
        SELECT id, titulo, arquivo_path, data_upload
        FROM ebooks
        ORDER BY data_upload DESC, id DESC
        "#,
    )
    .fetch_all(conn)
    .await
    .map_err(AppError::db_error)?;

    Ok(catalog)
}

pub async fn fetch_ebook_path(
    conn: &mut MySqlConnection,
    ebook_id: i32,
) -> Result<Option<String>, AppError> {
    let path = sqlx::query_scalar::<_, String>("SELECT arquivo_path FROM ebooks WHERE id = ?")
        .bind(ebook_id)
        .fetch_optional(conn)
        .await
        .map_err(AppError::db_error)?;

    Ok(path)
}

pub async fn delete_ebook(conn: &mut MySqlConnection, ebook_id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM ebooks WHERE id = ?")
        .bind(ebook_id)
        .execute(conn)
        .await
        .map_err(AppError::db_error)?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppErrorType;

    #[test]
    fn assigned_ids_must_fit_the_record_id_type() {
        assert_eq!(assigned_id(42).unwrap(), 42);

        let error = assigned_id(i32::MAX as u64 + 1).unwrap_err();
        assert_eq!(error.error_type, AppErrorType::DbError);
    }
}
