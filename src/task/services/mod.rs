//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, TaskQuery, TaskService, TaskServiceError, TaskServiceResult,
    UpdateTaskRequest,
};
