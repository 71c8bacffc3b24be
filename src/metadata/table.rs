use crate::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    // Order as reported by the backend.
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Construct a table with an explicit ordered list of (name, DataType) pairs.
    pub fn new_with_ordered(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (impl Into<String>, DataType)>,
    ) -> Self {
        Self {
            name: name.into(),
            columns: columns
                .into_iter()
                .map(|(name, data_type)| Column::new(name, data_type))
                .collect(),
        }
    }

    /// Build a table from the `COLUMN_NAME` / `TYPE_NAME` fields of a
    /// `DESCRIBE TABLES LIKE` response.
    pub fn from_describe(name: impl Into<String>, response: &QueryResponse) -> Result<Self> {
        let name = name.into();
        let field = |field: &str| {
            response.field(field).ok_or_else(|| {
                Error::Backend(format!("DESCRIBE response for '{name}' has no {field} field"))
            })
        };
        let names = field("COLUMN_NAME")?;
        let types = field("TYPE_NAME")?;

        let columns = names
            .values
            .iter()
            .zip(&types.values)
            .filter_map(|(name, data_type)| {
                Some(Column::new(name.as_str()?, data_type.as_str().unwrap_or_default()))
            })
            .collect::<Vec<_>>();
        debug!("Described '{name}': {} column(s)", columns.len());
        Ok(Self { name, columns })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Columns in preserved order.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}
