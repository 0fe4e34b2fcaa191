use crate::domain::mood_analysis::entity::mood_analysis;
use crate::domain::mood_record::entity::mood_record;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Statement};
use tracing::info;

/// DB 연결. `schema_update`가 켜져 있으면 테이블과 인덱스를 맞춘다.
pub async fn establish_connection(
    database_url: &str,
    schema_update: bool,
) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    info!("Successfully connected to the database.");

    if schema_update {
        create_tables(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    create_table_if_not_exists(db, &schema, mood_record::Entity).await?;
    create_table_if_not_exists(db, &schema, mood_analysis::Entity).await?;

    create_index_if_not_exists(db, "idx_mood_record_user_id", "mood_record", &["user_id"]).await?;
    create_index_if_not_exists(db, "idx_mood_analysis_user_id", "mood_analysis", &["user_id"])
        .await?;
    // 기록당 분석 1건: 동시 요청으로 인한 중복 저장은 여기서 막힌다
    create_unique_index_if_not_exists(
        db,
        "uq_mood_analysis_record_id",
        "mood_analysis",
        &["record_id"],
    )
    .await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

/// 인덱스가 이미 있어서 실패한 경우만 true (MySQL 1061 "Duplicate key name")
///
/// 1062 "Duplicate entry ... for key"는 기존 행이 UNIQUE 조건을 어긴다는 뜻이므로 false.
fn is_index_already_exists(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("duplicate key name") || message.contains("already exists")
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let sql = format!(
        "CREATE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    execute_ignoring_existing(db, index_name, sql).await
}

async fn create_unique_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let sql = format!(
        "CREATE UNIQUE INDEX {} ON {} ({})",
        index_name,
        table_name,
        columns.join(", ")
    );
    execute_ignoring_existing(db, index_name, sql).await
}

async fn execute_ignoring_existing(
    db: &DatabaseConnection,
    index_name: &str,
    sql: String,
) -> Result<(), DbErr> {
    let stmt = Statement::from_string(db.get_database_backend(), sql);
    match db.execute(stmt).await {
        Ok(_) => {
            info!("Created index '{}'", index_name);
            Ok(())
        }
        Err(e) if is_index_already_exists(&e.to_string()) => {
            info!("Index '{}' already exists", index_name);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to create index {}: {}", index_name, e);
            Err(e)
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table: {}", e);
        e
    })
}
