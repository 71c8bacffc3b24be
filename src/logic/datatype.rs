use derive_more::{Debug, Display};

/// Field types reported by the backend's `DESCRIBE` output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum DataType {
    #[display("boolean")]
    Boolean,
    #[display("byte")]
    Byte,
    #[display("short")]
    Short,
    #[display("integer")]
    Integer,
    #[display("long")]
    Long,
    #[display("half_float")]
    HalfFloat,
    #[display("float")]
    Float,
    #[display("scaled_float")]
    ScaledFloat,
    #[display("double")]
    Double,
    #[display("keyword")]
    Keyword,
    #[display("text")]
    Text,
    #[display("date")]
    Date,
    #[display("timestamp")]
    Timestamp,
    #[display("ip")]
    Ip,
    #[display("geo_point")]
    GeoPoint,
    #[display("binary")]
    Binary,
    #[display("object")]
    Object,
    #[display("nested")]
    Nested,
    /// Anything else, kept verbatim.
    #[display("{_0}")]
    Other(String),
}

impl DataType {
    /// Parse a backend type name, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        use DataType::*;
        match name.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Boolean,
            "byte" | "tinyint" => Byte,
            "short" | "smallint" => Short,
            "integer" | "int" => Integer,
            "long" | "bigint" => Long,
            "half_float" => HalfFloat,
            "float" | "real" => Float,
            "scaled_float" => ScaledFloat,
            "double" => Double,
            "keyword" | "string" => Keyword,
            "text" => Text,
            "date" => Date,
            "timestamp" | "datetime" => Timestamp,
            "ip" => Ip,
            "geo_point" => GeoPoint,
            "binary" => Binary,
            "object" | "struct" => Object,
            "nested" | "array" => Nested,
            _ => Other(name.to_string()),
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, DataType::Boolean)
    }
}

impl serde::Serialize for DataType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for DataType {
    fn from(name: &str) -> Self {
        DataType::from_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("BOOLEAN", DataType::Boolean)]
    #[case("keyword", DataType::Keyword)]
    #[case("STRING", DataType::Keyword)]
    #[case("Text", DataType::Text)]
    #[case("TIMESTAMP", DataType::Timestamp)]
    #[case("geo_shape", DataType::Other("geo_shape".into()))]
    fn parses_backend_names(#[case] name: &str, #[case] expected: DataType) {
        assert_eq!(DataType::from(name), expected);
    }

    #[test]
    fn display_is_lowercase_canonical() {
        assert_eq!(DataType::from("LONG").to_string(), "long");
        assert_eq!(DataType::from("HALF_FLOAT").to_string(), "half_float");
        assert_eq!(DataType::from("Custom").to_string(), "Custom");
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&DataType::GeoPoint).expect("serializable");
        assert_eq!(json, "\"geo_point\"");
    }
}
