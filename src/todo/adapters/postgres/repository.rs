//! `PostgreSQL` repository implementation for todo and task storage.

use super::{
    models::{NewTaskRow, NewTodoRow, TaskChangesetRow, TaskRow, TodoChangesetRow, TodoRow},
    schema::{tasks, todos},
};
use crate::config::PgPool;
use crate::member::domain::MemberId;
use crate::todo::{
    domain::{
        CompletionStatus, Deadline, PersistedTaskData, PersistedTodoData, Task, TaskId, Todo,
        TodoId,
    },
    ports::{
        TodoReader, TodoRepository, TodoRepositoryError, TodoRepositoryResult, TodoTransaction,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed todo repository.
///
/// Each transaction runs on one pooled connection inside a database
/// transaction. [`TodoTransaction::lock_todo`] takes a row lock with
/// `SELECT ... FOR UPDATE`. Read-only units run in a `READ ONLY`
/// transaction so multi-query views stay consistent.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Failure raised inside a Diesel transaction closure.
///
/// Keeps the caller's error apart from errors Diesel raises while opening
/// or committing.
enum TransactionFailure<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TransactionFailure<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl<E: From<TodoRepositoryError>> TransactionFailure<E> {
    fn into_error(self) -> E {
        match self {
            Self::Work(err) => err,
            Self::Database(err) => E::from(TodoRepositoryError::persistence(err)),
        }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TodoTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TodoRepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(TodoRepositoryError::persistence(err)))?;
            connection
                .transaction::<T, TransactionFailure<E>, _>(|conn| {
                    let mut unit = PgTodoTransaction { connection: conn };
                    work(&mut unit).map_err(TransactionFailure::Work)
                })
                .map_err(TransactionFailure::into_error)
        })
        .await
        .map_err(|err| E::from(TodoRepositoryError::persistence(err)))?
    }

    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TodoReader) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TodoRepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(TodoRepositoryError::persistence(err)))?;
            connection
                .build_transaction()
                .read_only()
                .run::<T, TransactionFailure<E>, _>(|conn| {
                    let mut unit = PgTodoTransaction { connection: conn };
                    work(&mut unit).map_err(TransactionFailure::Work)
                })
                .map_err(TransactionFailure::into_error)
        })
        .await
        .map_err(|err| E::from(TodoRepositoryError::persistence(err)))?
    }
}

struct PgTodoTransaction<'conn> {
    connection: &'conn mut PgConnection,
}

impl TodoReader for PgTodoTransaction<'_> {
    fn find_todo(&mut self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let row = todos::table
            .find(id.into_inner())
            .select(TodoRow::as_select())
            .first::<TodoRow>(self.connection)
            .optional()
            .map_err(TodoRepositoryError::persistence)?;
        row.map(row_to_todo).transpose()
    }

    fn find_todos_by_writer(
        &mut self,
        writer_id: MemberId,
        status: Option<CompletionStatus>,
    ) -> TodoRepositoryResult<Vec<Todo>> {
        let mut query = todos::table
            .filter(todos::writer_id.eq(writer_id.into_inner()))
            .select(TodoRow::as_select())
            .order((
                todos::deadline.asc(),
                todos::created_at.asc(),
                todos::id.asc(),
            ))
            .into_boxed();
        if let Some(wanted) = status {
            query = query.filter(todos::status.eq(wanted.as_str()));
        }
        let rows = query
            .load::<TodoRow>(self.connection)
            .map_err(TodoRepositoryError::persistence)?;
        rows.into_iter().map(row_to_todo).collect()
    }

    fn find_task(&mut self, id: TaskId) -> TodoRepositoryResult<Option<Task>> {
        let row = tasks::table
            .find(id.into_inner())
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.connection)
            .optional()
            .map_err(TodoRepositoryError::persistence)?;
        row.map(row_to_task).transpose()
    }

    fn find_tasks_by_todo(&mut self, todo_id: TodoId) -> TodoRepositoryResult<Vec<Task>> {
        let rows = tasks::table
            .filter(tasks::todo_id.eq(todo_id.into_inner()))
            .select(TaskRow::as_select())
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .load::<TaskRow>(self.connection)
            .map_err(TodoRepositoryError::persistence)?;
        rows.into_iter().map(row_to_task).collect()
    }

    fn exists_task_with_status(
        &mut self,
        todo_id: TodoId,
        status: CompletionStatus,
    ) -> TodoRepositoryResult<bool> {
        diesel::select(diesel::dsl::exists(
            tasks::table
                .filter(tasks::todo_id.eq(todo_id.into_inner()))
                .filter(tasks::status.eq(status.as_str())),
        ))
        .get_result::<bool>(self.connection)
        .map_err(TodoRepositoryError::persistence)
    }
}

impl TodoTransaction for PgTodoTransaction<'_> {
    fn lock_todo(&mut self, id: TodoId) -> TodoRepositoryResult<Option<Todo>> {
        let row = todos::table
            .find(id.into_inner())
            .select(TodoRow::as_select())
            .for_update()
            .first::<TodoRow>(self.connection)
            .optional()
            .map_err(TodoRepositoryError::persistence)?;
        row.map(row_to_todo).transpose()
    }

    fn insert_todo(&mut self, todo: &Todo) -> TodoRepositoryResult<()> {
        let todo_id = todo.id();
        diesel::insert_into(todos::table)
            .values(&to_new_todo_row(todo))
            .execute(self.connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    TodoRepositoryError::DuplicateTodo(todo_id)
                }
                _ => TodoRepositoryError::persistence(err),
            })?;
        Ok(())
    }

    fn update_todo(&mut self, todo: &Todo) -> TodoRepositoryResult<()> {
        let updated = diesel::update(todos::table.find(todo.id().into_inner()))
            .set(&to_todo_changeset(todo))
            .execute(self.connection)
            .map_err(TodoRepositoryError::persistence)?;
        if updated == 0 {
            return Err(TodoRepositoryError::TodoNotFound(todo.id()));
        }
        Ok(())
    }

    fn delete_todo(&mut self, id: TodoId) -> TodoRepositoryResult<()> {
        let deleted = diesel::delete(todos::table.find(id.into_inner()))
            .execute(self.connection)
            .map_err(TodoRepositoryError::persistence)?;
        if deleted == 0 {
            return Err(TodoRepositoryError::TodoNotFound(id));
        }
        Ok(())
    }

    fn insert_task(&mut self, task: &Task) -> TodoRepositoryResult<()> {
        let task_id = task.id();
        let todo_id = task.todo_id();
        diesel::insert_into(tasks::table)
            .values(&to_new_task_row(task))
            .execute(self.connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    TodoRepositoryError::DuplicateTask(task_id)
                }
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    TodoRepositoryError::TodoNotFound(todo_id)
                }
                _ => TodoRepositoryError::persistence(err),
            })?;
        Ok(())
    }

    fn update_task(&mut self, task: &Task) -> TodoRepositoryResult<()> {
        let updated = diesel::update(tasks::table.find(task.id().into_inner()))
            .set(&to_task_changeset(task))
            .execute(self.connection)
            .map_err(TodoRepositoryError::persistence)?;
        if updated == 0 {
            return Err(TodoRepositoryError::TaskNotFound(task.id()));
        }
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> TodoRepositoryResult<()> {
        let deleted = diesel::delete(tasks::table.find(id.into_inner()))
            .execute(self.connection)
            .map_err(TodoRepositoryError::persistence)?;
        if deleted == 0 {
            return Err(TodoRepositoryError::TaskNotFound(id));
        }
        Ok(())
    }

    fn delete_tasks_by_todo(&mut self, todo_id: TodoId) -> TodoRepositoryResult<usize> {
        diesel::delete(tasks::table.filter(tasks::todo_id.eq(todo_id.into_inner())))
            .execute(self.connection)
            .map_err(TodoRepositoryError::persistence)
    }
}

fn to_new_todo_row(todo: &Todo) -> NewTodoRow {
    NewTodoRow {
        id: todo.id().into_inner(),
        writer_id: todo.writer_id().into_inner(),
        title: todo.title().to_owned(),
        deadline: todo.deadline().as_datetime(),
        status: todo.status().as_str().to_owned(),
        created_at: todo.created_at(),
        updated_at: todo.updated_at(),
        completed_at: todo.completed_at(),
    }
}

fn to_todo_changeset(todo: &Todo) -> TodoChangesetRow {
    TodoChangesetRow {
        title: todo.title().to_owned(),
        deadline: todo.deadline().as_datetime(),
        status: todo.status().as_str().to_owned(),
        updated_at: todo.updated_at(),
        completed_at: todo.completed_at(),
    }
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        todo_id: task.todo_id().into_inner(),
        content: task.content().to_owned(),
        status: task.status().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn to_task_changeset(task: &Task) -> TaskChangesetRow {
    TaskChangesetRow {
        content: task.content().to_owned(),
        status: task.status().as_str().to_owned(),
        updated_at: task.updated_at(),
        completed_at: task.completed_at(),
    }
}

fn row_to_todo(row: TodoRow) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        writer_id,
        title,
        deadline,
        status: persisted_status,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let status = CompletionStatus::try_from(persisted_status.as_str())
        .map_err(TodoRepositoryError::persistence)?;

    Ok(Todo::from_persisted(PersistedTodoData {
        id: TodoId::from_uuid(id),
        writer_id: MemberId::from_uuid(writer_id),
        title,
        deadline: Deadline::at(deadline),
        status,
        created_at,
        updated_at,
        completed_at,
    }))
}

fn row_to_task(row: TaskRow) -> TodoRepositoryResult<Task> {
    let TaskRow {
        id,
        todo_id,
        content,
        status: persisted_status,
        created_at,
        updated_at,
        completed_at,
    } = row;

    let status = CompletionStatus::try_from(persisted_status.as_str())
        .map_err(TodoRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        todo_id: TodoId::from_uuid(todo_id),
        content,
        status,
        created_at,
        updated_at,
        completed_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::{TaskRow, TodoRow, row_to_task, row_to_todo, to_new_todo_row, to_task_changeset};
    use crate::member::domain::MemberId;
    use crate::todo::domain::{CompletionStatus, Deadline, Task, Todo};
    use crate::todo::ports::TodoRepositoryError;
    use chrono::{Duration, Utc};
    use mockable::DefaultClock;
    use rstest::rstest;

    fn open_todo() -> Todo {
        let deadline = Deadline::at(Utc::now() + Duration::days(1));
        Todo::new(MemberId::new(), "Report", Some(deadline), &DefaultClock).expect("valid todo")
    }

    #[rstest]
    fn todo_row_round_trips_through_insert_model() {
        let todo = open_todo();
        let new_row = to_new_todo_row(&todo);

        let restored = row_to_todo(TodoRow {
            id: new_row.id,
            writer_id: new_row.writer_id,
            title: new_row.title,
            deadline: new_row.deadline,
            status: new_row.status,
            created_at: new_row.created_at,
            updated_at: new_row.updated_at,
            completed_at: new_row.completed_at,
        })
        .expect("row should convert");

        assert_eq!(restored, todo);
    }

    #[rstest]
    fn unknown_status_is_a_persistence_error() {
        let todo = open_todo();
        let new_row = to_new_todo_row(&todo);

        let result = row_to_task(TaskRow {
            id: uuid::Uuid::new_v4(),
            todo_id: new_row.id,
            content: "draft".to_owned(),
            status: "archived".to_owned(),
            created_at: new_row.created_at,
            updated_at: new_row.updated_at,
            completed_at: None,
        });

        assert!(matches!(result, Err(TodoRepositoryError::Persistence(_))));
    }

    #[rstest]
    fn task_changeset_carries_completion() {
        let todo = open_todo();
        let mut task = Task::new(&todo, "draft", &DefaultClock).expect("valid task");
        task.complete(&todo, &DefaultClock).expect("complete");

        let changeset = to_task_changeset(&task);

        assert_eq!(changeset.status, CompletionStatus::Complete.as_str());
        assert_eq!(changeset.completed_at, task.completed_at());
    }
}
