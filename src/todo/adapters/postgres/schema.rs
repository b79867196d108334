//! Diesel schema for todo and task persistence.

diesel::table! {
    /// Todos owned by members.
    todos (id) {
        /// Todo identifier.
        id -> Uuid,
        /// Owning member identifier.
        writer_id -> Uuid,
        /// Todo title.
        #[max_length = 255]
        title -> Varchar,
        /// Deadline instant.
        deadline -> Timestamptz,
        /// Completion status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Tasks belonging to todos.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Parent todo identifier.
        todo_id -> Uuid,
        /// Task content.
        content -> Text,
        /// Completion status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(tasks -> todos (todo_id));
diesel::allow_tables_to_appear_in_same_query!(todos, tasks);
