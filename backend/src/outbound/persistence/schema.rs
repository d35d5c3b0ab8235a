//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is stored lower-cased and unique.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Text,
        /// `admin` or `user`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Complaint records. The three `feedback_*` columns are all set or all
    /// null (CHECK `complaints_feedback_all_or_none`).
    complaints (id) {
        id -> Uuid,
        /// Owning account; intentionally not a foreign key.
        user_id -> Uuid,
        title -> Text,
        description -> Text,
        category -> Varchar,
        status -> Varchar,
        feedback_rating -> Nullable<Int2>,
        feedback_comment -> Nullable<Text>,
        feedback_created_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, complaints);
