//! Diesel schema for member persistence.

diesel::table! {
    /// Registered members.
    members (id) {
        /// Member identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 10]
        name -> Varchar,
        /// Unique login identifier.
        #[max_length = 100]
        login_id -> Varchar,
        /// Hex-encoded password hash.
        #[max_length = 128]
        password_hash -> Varchar,
        /// Contact email address.
        #[max_length = 255]
        email -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
