// netlytics-core/src/domain/table/schema.rs

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Timestamp,
    Boolean,
    Integer,
    /// Fixed-length hex digest of a PII field.
    Digest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnType,
}

/// Ordered, uniquely named columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<ColumnDef>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self, DomainError> {
        let mut schema = Self::default();
        for col in columns {
            schema.push(col)?;
        }
        Ok(schema)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub(crate) fn push(&mut self, col: ColumnDef) -> Result<(), DomainError> {
        if let Some(existing) = self.columns.iter().find(|c| c.name == col.name) {
            return Err(DomainError::SchemaCollision {
                source_name: String::new(),
                canonical: col.name.clone(),
                first: existing.name.clone(),
                second: col.name,
            });
        }
        self.columns.push(col);
        Ok(())
    }

    pub(crate) fn set_kind(&mut self, idx: usize, kind: ColumnType) {
        if let Some(col) = self.columns.get_mut(idx) {
            col.kind = kind;
        }
    }

    pub(crate) fn rename(&mut self, idx: usize, name: String) -> Result<(), DomainError> {
        if let Some(other) = self.index_of(&name)
            && other != idx
        {
            return Err(DomainError::SchemaCollision {
                source_name: String::new(),
                canonical: name.clone(),
                first: self.columns[other].name.clone(),
                second: name,
            });
        }
        if let Some(col) = self.columns.get_mut(idx) {
            col.name = name;
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, idx: usize) -> Option<ColumnDef> {
        (idx < self.columns.len()).then(|| self.columns.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(name: &str) -> ColumnDef {
        ColumnDef {
            name: name.to_string(),
            kind: ColumnType::Text,
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let res = Schema::new(vec![text("a"), text("b"), text("a")]);
        assert!(matches!(res, Err(DomainError::SchemaCollision { .. })));
    }

    #[test]
    fn test_rename_into_existing_name_rejected() -> anyhow::Result<()> {
        let mut schema = Schema::new(vec![text("a"), text("b")])?;
        assert!(schema.rename(1, "a".into()).is_err());
        schema.rename(1, "c".into())?;
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["a", "c"]);
        Ok(())
    }
}
