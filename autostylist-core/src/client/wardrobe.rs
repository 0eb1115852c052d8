// File: autostylist-core/src/client/wardrobe.rs

use async_trait::async_trait;
use urlencoding::encode;

use autostylist_common::models::{
    Ack, AuthContext, Category, Gender, Style, UploadFile, UploadResponse, WardrobeList,
    WardrobeStats,
};
use autostylist_common::traits::WardrobeApi;
use autostylist_common::ErrorKind;

use super::{Access, ApiClient, Operation};
use crate::http::{FilePart, HttpRequest, RequestBody};
use crate::Error;

const UPLOAD: Operation = Operation {
    name: "upload",
    fallback: "Upload failed",
    in_band: ErrorKind::Validation,
};
const WARDROBE: Operation = Operation {
    name: "wardrobe",
    fallback: "Failed to load wardrobe",
    in_band: ErrorKind::Transport,
};
const STATS: Operation = Operation {
    name: "wardrobe_stats",
    fallback: "Failed to load wardrobe stats",
    in_band: ErrorKind::Transport,
};
const DELETE: Operation = Operation {
    name: "delete_item",
    fallback: "Failed to delete item",
    in_band: ErrorKind::NotFound,
};

#[async_trait]
impl WardrobeApi for ApiClient {
    async fn upload_item(
        &self,
        ctx: &AuthContext,
        file: &UploadFile,
        category: Category,
        style: Style,
        gender: Gender,
    ) -> Result<UploadResponse, Error> {
        file.validate()?;
        let body = RequestBody::Multipart {
            fields: vec![
                ("category".to_string(), category.to_string()),
                ("style".to_string(), style.to_string()),
                ("gender".to_string(), gender.to_string()),
            ],
            file: Some(FilePart {
                field: "file".to_string(),
                file_name: file.file_name.clone(),
                content_type: file.content_type.clone(),
                bytes: file.bytes.clone(),
            }),
        };
        let request = self.authorize(
            HttpRequest::post(self.url("/upload")).with_body(body),
            ctx,
            Access::from_flag(self.config.auth_policy.upload),
            &UPLOAD,
        )?;
        self.call(&UPLOAD, request).await
    }

    async fn get_wardrobe(&self, ctx: &AuthContext) -> Result<WardrobeList, Error> {
        let request = self.authorize(
            HttpRequest::get(self.url("/wardrobe")),
            ctx,
            Access::from_flag(self.config.auth_policy.wardrobe),
            &WARDROBE,
        )?;
        self.call(&WARDROBE, request).await
    }

    async fn get_wardrobe_by_category(&self, ctx: &AuthContext, category: Category) -> Result<WardrobeList, Error> {
        let path = format!("/wardrobe/{}", encode(category.as_str()));
        let request = self.authorize(
            HttpRequest::get(self.url(&path)),
            ctx,
            Access::from_flag(self.config.auth_policy.wardrobe),
            &WARDROBE,
        )?;
        self.call(&WARDROBE, request).await
    }

    async fn get_wardrobe_stats(&self, ctx: &AuthContext) -> Result<WardrobeStats, Error> {
        let request = self.authorize(HttpRequest::get(self.url("/stats")), ctx, Access::Required, &STATS)?;
        self.call(&STATS, request).await
    }

    async fn delete_wardrobe_item(&self, ctx: &AuthContext, item_id: &str) -> Result<Ack, Error> {
        if item_id.trim().is_empty() {
            return Err(Error::validation("Item id is required"));
        }
        let path = format!("/wardrobe/{}", encode(item_id));
        let request = self.authorize(HttpRequest::delete(self.url(&path)), ctx, Access::Required, &DELETE)?;
        self.call(&DELETE, request).await
    }
}
