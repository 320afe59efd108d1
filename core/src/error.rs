use crate::model::usage::Field;

/// The one recoverable pipeline error: a stage needs columns the working table lacks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("{stage}: missing column(s) {}", join_columns(.columns))]
    Missing {
        stage: &'static str,
        columns: Vec<Field>,
    },
}

impl SchemaError {
    pub fn columns(&self) -> &[Field] {
        match self {
            SchemaError::Missing { columns, .. } => columns,
        }
    }
}

fn join_columns(columns: &[Field]) -> String {
    columns
        .iter()
        .map(|c| format!("'{}'", c.column_name()))
        .collect::<Vec<_>>()
        .join(", ")
}
