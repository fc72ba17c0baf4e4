use serde::{Deserialize, Serialize};

use crate::grid::TileExtent;

pub const DEFAULT_ROW_CAPACITY: u32 = 3;
pub const DEFAULT_GAP: f32 = 3.0;

/// One gallery item as declared in markup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemNode {
    /// Size descriptor `"W/H"` in grid units; absent means 1/1.
    #[serde(default)]
    pub size: Option<String>,
    /// Comma-separated category labels; absent means no category.
    #[serde(default)]
    pub category: Option<String>,
    /// Display label used by frontends.
    #[serde(default)]
    pub label: String,
}

/// A mountable gallery container: configuration attributes plus the ordered
/// items found inside it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerNode {
    #[serde(default)]
    pub id: String,
    /// Attribute strings as they appear in markup; parsing happens at mount.
    #[serde(default)]
    pub row_capacity: Option<String>,
    #[serde(default)]
    pub gap: Option<String>,
    /// Content width in pixels at mount time.
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub items: Vec<ItemNode>,
}

/// A page of containers; selector targets resolve against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub containers: Vec<ContainerNode>,
}

impl Page {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve a `#id` selector to a container.
    pub fn find(&self, selector: &str) -> Option<&ContainerNode> {
        let id = selector.strip_prefix('#')?;
        self.containers.iter().find(|c| c.id == id)
    }
}

/// Construction target: a container reference, or a selector resolved
/// against a page.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Container(&'a ContainerNode),
    Selector(&'a str),
}

/// Mount configuration read from container attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountConfig {
    pub row_capacity: u32,
    pub gap: f32,
}

impl MountConfig {
    /// Missing, non-numeric, or non-positive capacity values silently fall
    /// back to the defaults; no diagnostic.
    pub fn from_container(node: &ContainerNode) -> Self {
        let row_capacity = node
            .row_capacity
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|&c| c >= 1)
            .unwrap_or(DEFAULT_ROW_CAPACITY);

        let gap = node
            .gap
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|g| g as f32)
            .unwrap_or(DEFAULT_GAP);

        Self { row_capacity, gap }
    }
}

/// Parse a `"W/H"` size descriptor. Invalid components (non-numeric,
/// non-positive, or a width exceeding the row capacity) are coerced to 1
/// with an error-level diagnostic; processing continues.
pub fn parse_size(descriptor: Option<&str>, row_capacity: u32, item_index: usize) -> TileExtent {
    let mut extent = TileExtent::default();

    let Some(descriptor) = descriptor else {
        return extent;
    };

    let mut parts = descriptor.split('/');
    if let Some(part) = parts.next() {
        match part.trim().parse::<u32>() {
            Ok(w) if w >= 1 && w <= row_capacity => extent.width = w,
            _ => log::error!("invalid width specified for gallery item {item_index} ({descriptor:?})"),
        }
    }
    if let Some(part) = parts.next() {
        match part.trim().parse::<u32>() {
            Ok(h) if h >= 1 => extent.height = h,
            _ => log::error!("invalid height specified for gallery item {item_index} ({descriptor:?})"),
        }
    }

    extent
}

/// Split a comma-separated category attribute into trimmed labels.
pub fn parse_categories(attribute: Option<&str>) -> Vec<String> {
    let Some(attribute) = attribute else {
        return Vec::new();
    };
    attribute
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_config_defaults() {
        let node = ContainerNode::default();
        let config = MountConfig::from_container(&node);
        assert_eq!(config.row_capacity, DEFAULT_ROW_CAPACITY);
        assert_eq!(config.gap, DEFAULT_GAP);
    }

    #[test]
    fn test_mount_config_parses_attributes() {
        let node = ContainerNode {
            row_capacity: Some("5".into()),
            gap: Some("12".into()),
            ..Default::default()
        };
        let config = MountConfig::from_container(&node);
        assert_eq!(config.row_capacity, 5);
        assert_eq!(config.gap, 12.0);
    }

    #[test]
    fn test_mount_config_non_numeric_falls_back() {
        let node = ContainerNode {
            row_capacity: Some("lots".into()),
            gap: Some("-4".into()),
            ..Default::default()
        };
        let config = MountConfig::from_container(&node);
        assert_eq!(config.row_capacity, DEFAULT_ROW_CAPACITY);
        assert_eq!(config.gap, DEFAULT_GAP);
    }

    #[test]
    fn test_mount_config_zero_capacity_falls_back() {
        let node = ContainerNode {
            row_capacity: Some("0".into()),
            ..Default::default()
        };
        assert_eq!(MountConfig::from_container(&node).row_capacity, DEFAULT_ROW_CAPACITY);
    }

    #[test]
    fn test_parse_size_defaults_to_unit() {
        assert_eq!(parse_size(None, 3, 0), TileExtent::new(1, 1));
    }

    #[test]
    fn test_parse_size_reads_both_components() {
        assert_eq!(parse_size(Some("2/3"), 3, 0), TileExtent::new(2, 3));
    }

    #[test]
    fn test_parse_size_width_only() {
        // A lone "2" sets the width; the height stays at its default.
        assert_eq!(parse_size(Some("2"), 3, 0), TileExtent::new(2, 1));
    }

    #[test]
    fn test_parse_size_coerces_invalid_components() {
        assert_eq!(parse_size(Some("x/2"), 3, 0), TileExtent::new(1, 2));
        assert_eq!(parse_size(Some("2/0"), 3, 0), TileExtent::new(2, 1));
        assert_eq!(parse_size(Some(""), 3, 0), TileExtent::new(1, 1));
    }

    #[test]
    fn test_parse_size_clamps_width_to_capacity() {
        // Height is unbounded, width is not.
        assert_eq!(parse_size(Some("9/9"), 3, 0), TileExtent::new(1, 9));
    }

    #[test]
    fn test_parse_categories() {
        assert_eq!(
            parse_categories(Some(" nature, city ,nature ")),
            vec!["nature", "city", "nature"]
        );
        assert!(parse_categories(None).is_empty());
        assert!(parse_categories(Some("  ,")).is_empty());
    }

    #[test]
    fn test_page_find_by_selector() {
        let page = Page {
            containers: vec![ContainerNode {
                id: "gallery".into(),
                ..Default::default()
            }],
        };
        assert!(page.find("#gallery").is_some());
        assert!(page.find("#missing").is_none());
        assert!(page.find("gallery").is_none());
    }

    #[test]
    fn test_page_from_json() {
        let page = Page::from_json(
            r#"{
                "containers": [{
                    "id": "g",
                    "row_capacity": "4",
                    "width": 900.0,
                    "items": [
                        { "size": "2/1", "category": "nature", "label": "Dunes" },
                        { "label": "Untitled" }
                    ]
                }]
            }"#,
        )
        .unwrap();

        let node = page.find("#g").unwrap();
        assert_eq!(node.items.len(), 2);
        assert_eq!(node.items[0].size.as_deref(), Some("2/1"));
        assert!(node.items[1].category.is_none());
    }
}
