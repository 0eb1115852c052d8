use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use autostylist_common::models::{
    Ack, Category, Gender, Style, UploadFile, UploadResponse, WardrobeItem, WardrobeStats,
};
use autostylist_common::traits::WardrobeApi;

use crate::session::Session;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, item: &WardrobeItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(cat) => item.category == *cat,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(cat) => write!(f, "{cat}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Local view of the user's wardrobe.
pub struct WardrobeService {
    api: Arc<dyn WardrobeApi>,
    session: Arc<Session>,
    items: RwLock<Vec<WardrobeItem>>,
}

impl WardrobeService {
    pub fn new(api: Arc<dyn WardrobeApi>, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            items: RwLock::new(Vec::new()),
        }
    }

    /// Reloads the catalog. Returns the number of items.
    pub async fn refresh(&self) -> Result<usize, Error> {
        let res = self.api.get_wardrobe(self.session.context()).await;
        let list = self.session.check(res).await?;
        let count = list.items.len();
        *self.items.write().await = list.items;
        Ok(count)
    }

    /// Server-side filter; does not touch the local catalog.
    pub async fn fetch_category(&self, category: Category) -> Result<Vec<WardrobeItem>, Error> {
        let res = self.api.get_wardrobe_by_category(self.session.context(), category).await;
        Ok(self.session.check(res).await?.items)
    }

    pub async fn items(&self, filter: CategoryFilter) -> Vec<WardrobeItem> {
        self.items
            .read()
            .await
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect()
    }

    /// Counts from the local catalog, in the backend's stats shape.
    pub async fn local_stats(&self) -> WardrobeStats {
        let items = self.items.read().await;
        let mut categories = BTreeMap::new();
        for item in items.iter() {
            *categories.entry(item.category.as_str().to_string()).or_insert(0) += 1;
        }
        WardrobeStats {
            total: items.len() as u64,
            categories,
        }
    }

    pub async fn remote_stats(&self) -> Result<WardrobeStats, Error> {
        let res = self.api.get_wardrobe_stats(self.session.context()).await;
        self.session.check(res).await
    }

    /// The local catalog is left as is; call `refresh` to see the new item.
    pub async fn upload(
        &self,
        file: &UploadFile,
        category: Category,
        style: Style,
        gender: Gender,
    ) -> Result<UploadResponse, Error> {
        let res = self
            .api
            .upload_item(self.session.context(), file, category, style, gender)
            .await;
        let resp = self.session.check(res).await?;
        info!("Uploaded {} as {category}/{style}/{gender}", file.file_name);
        Ok(resp)
    }

    /// Drops the item locally once the backend acknowledged the delete.
    pub async fn delete(&self, item_id: &str) -> Result<Ack, Error> {
        let res = self.api.delete_wardrobe_item(self.session.context(), item_id).await;
        let ack = self.session.check(res).await?;
        self.items.write().await.retain(|i| i.id != item_id);
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "saree".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Saree)
        );
        assert!("hats".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::Only(Category::FullBody).to_string(), "full_body");
    }
}
