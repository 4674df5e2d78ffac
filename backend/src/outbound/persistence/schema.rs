//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation. Regenerate
//! with `diesel print-schema` after changing migrations.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique handle (unique constraint `users_username_key`).
        #[max_length = 32]
        username -> Varchar,
        /// Unique login email (unique constraint `users_email_key`).
        #[max_length = 254]
        email -> Varchar,
        /// Encoded Argon2id PHC string.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Discussion board posts.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Post title.
        #[max_length = 120]
        title -> Varchar,
        /// Post body text.
        body -> Text,
        /// Authoring user (foreign key into `users`).
        author_id -> Uuid,
        /// Record creation timestamp; listings order by it.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Visitor questions with optional answers.
    questions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Question title.
        #[max_length = 120]
        title -> Varchar,
        /// Question text.
        body -> Text,
        /// Answer text, present once answered.
        answer -> Nullable<Text>,
        /// Monotonic answered flag; never reset to false.
        answered -> Bool,
        /// Record creation timestamp; listings order by it.
        created_at -> Timestamptz,
        /// Timestamp of the first answer submission.
        answered_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::allow_tables_to_appear_in_same_query!(posts, users);
