use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListCities,
    GetCity,
    AddCity,
    DeleteCity,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::ListCities => "list_cities",
            Operation::GetCity => "get_city",
            Operation::AddCity => "add_city",
            Operation::DeleteCity => "delete_city",
        }
    }

    fn context(self) -> &'static str {
        match self {
            Operation::ListCities => "There was an error fetching the cities with error: ",
            Operation::GetCity => "There was an error fetching the city with error: ",
            Operation::AddCity => "There was an error while adding the city: ",
            Operation::DeleteCity => "There was an error while deleting the city: ",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{}{}", .operation.context(), .message)]
    RemoteOperationFailed {
        operation: Operation,
        message: String,
    },
}

impl StoreError {
    /// Flattens the failure chain (`a: b: c`) so the stored text carries the root cause.
    pub fn remote(operation: Operation, source: &anyhow::Error) -> Self {
        Self::RemoteOperationFailed {
            operation,
            message: format!("{source:#}"),
        }
    }
}
