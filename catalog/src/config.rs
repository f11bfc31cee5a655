use crate::types::Image;
use serde::Deserialize;
use std::path::PathBuf;

/// Where the catalog is loaded from.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
#[serde(tag = "type")]
pub enum CatalogConfig {
    /// JSON metadata file read at startup.
    File { path: PathBuf },
    /// Images listed directly in the config file. Handy for local development.
    Inline { images: Vec<Image> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let config: CatalogConfig = serde_yaml::from_str(
            r#"
            type: file
            path: /var/lib/picsum/metadata.json
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            CatalogConfig::File {
                path: "/var/lib/picsum/metadata.json".into()
            }
        );

        let config: CatalogConfig = serde_yaml::from_str(
            r#"
            type: inline
            images:
              - {id: "1", author: John Doe, width: 300, height: 400, url: "https://picsum.photos"}
            "#,
        )
        .unwrap();
        assert!(matches!(config, CatalogConfig::Inline { images } if images.len() == 1));

        assert!(serde_yaml::from_str::<CatalogConfig>("type: postgres").is_err());
    }
}
