use log::trace;
use sqlx::{sqlite::SqliteRow, types::Json, FromRow, QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Gig, GigUpdate, NewGig},
    order_objects::{GigQueryFilter, GigSort},
    GigApiError,
};

pub async fn insert_gig(gig: NewGig, conn: &mut SqliteConnection) -> Result<Gig, GigApiError> {
    let gig = sqlx::query_as(
        r#"
            INSERT INTO gigs (
                seller_id,
                title,
                category,
                description,
                price,
                cover,
                images,
                features,
                delivery_days,
                revision_count
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *;
        "#,
    )
    .bind(gig.seller_id)
    .bind(gig.title)
    .bind(gig.category)
    .bind(gig.description)
    .bind(gig.price.value())
    .bind(gig.cover)
    .bind(Json(gig.images))
    .bind(Json(gig.features))
    .bind(gig.delivery_days)
    .bind(gig.revision_count)
    .fetch_one(conn)
    .await?;
    Ok(gig)
}

pub async fn fetch_gig(id: i64, conn: &mut SqliteConnection) -> Result<Option<Gig>, GigApiError> {
    let gig = sqlx::query_as("SELECT * FROM gigs WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(gig)
}

/// Fetches gigs according to the criteria in the `GigQueryFilter`, ordered by the filter's sort
/// column (newest first by default).
pub async fn search_gigs(query: GigQueryFilter, conn: &mut SqliteConnection) -> Result<Vec<Gig>, GigApiError> {
    let mut builder = QueryBuilder::new(
        r#"
    SELECT * FROM gigs
    "#,
    );
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(seller_id) = query.seller_id {
        where_clause.push("seller_id = ");
        where_clause.push_bind_unseparated(seller_id);
    }
    if let Some(category) = query.category {
        where_clause.push("category = ");
        where_clause.push_bind_unseparated(category);
    }
    if let Some(min) = query.min_price {
        where_clause.push("price >= ");
        where_clause.push_bind_unseparated(min.value());
    }
    if let Some(max) = query.max_price {
        where_clause.push("price <= ");
        where_clause.push_bind_unseparated(max.value());
    }
    if let Some(search) = query.search {
        where_clause.push("title LIKE ");
        where_clause.push_bind_unseparated(format!("%{search}%"));
    }
    let order_by = match query.sort.unwrap_or_default() {
        GigSort::Sales => " ORDER BY sales DESC",
        GigSort::Price => " ORDER BY price DESC",
        GigSort::CreatedAt => " ORDER BY created_at DESC",
    };
    builder.push(order_by);

    trace!("🗃️ Executing query: {}", builder.sql());
    let gigs = builder.build_query_as::<Gig>().fetch_all(conn).await?;
    trace!("🗃️ Result of search_gigs: {} rows", gigs.len());
    Ok(gigs)
}

pub(crate) async fn update_gig(
    id: i64,
    update: GigUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Gig>, GigApiError> {
    if update.is_empty() {
        return fetch_gig(id, conn).await;
    }
    let mut builder = QueryBuilder::new("UPDATE gigs SET updated_at = CURRENT_TIMESTAMP, ");
    let mut set_clause = builder.separated(", ");
    if let Some(title) = update.new_title {
        set_clause.push("title = ");
        set_clause.push_bind_unseparated(title);
    }
    if let Some(category) = update.new_category {
        set_clause.push("category = ");
        set_clause.push_bind_unseparated(category);
    }
    if let Some(description) = update.new_description {
        set_clause.push("description = ");
        set_clause.push_bind_unseparated(description);
    }
    if let Some(price) = update.new_price {
        set_clause.push("price = ");
        set_clause.push_bind_unseparated(price.value());
    }
    if let Some(cover) = update.new_cover {
        set_clause.push("cover = ");
        set_clause.push_bind_unseparated(cover);
    }
    if let Some(images) = update.new_images {
        set_clause.push("images = ");
        set_clause.push_bind_unseparated(Json(images));
    }
    if let Some(features) = update.new_features {
        set_clause.push("features = ");
        set_clause.push_bind_unseparated(Json(features));
    }
    if let Some(delivery_days) = update.new_delivery_days {
        set_clause.push("delivery_days = ");
        set_clause.push_bind_unseparated(delivery_days);
    }
    if let Some(revision_count) = update.new_revision_count {
        set_clause.push("revision_count = ");
        set_clause.push_bind_unseparated(revision_count);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let gig = builder.build().fetch_optional(conn).await?.map(|row: SqliteRow| Gig::from_row(&row)).transpose()?;
    Ok(gig)
}

pub async fn delete_gig(id: i64, conn: &mut SqliteConnection) -> Result<bool, GigApiError> {
    let result = sqlx::query("DELETE FROM gigs WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}
