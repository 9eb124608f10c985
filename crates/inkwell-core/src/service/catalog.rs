//! Staff-managed categories and locations.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Category, Location, Viewer};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::forms::{CategoryForm, LocationForm, ValidationErrors};
use crate::ports::{CategoryRepository, LocationRepository};

use super::require_viewer;

const SLUG_TAKEN: &str = "Category with this slug already exists.";

fn require_staff(viewer: Option<&Viewer>) -> DomainResult<&Viewer> {
    let viewer = require_viewer(viewer)?;
    if !viewer.is_staff {
        tracing::warn!(viewer_id = %viewer.user_id, "Catalog change by non-staff rejected");
        return Err(DomainError::Forbidden);
    }
    Ok(viewer)
}

fn slug_taken(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(_) => {
            DomainError::Validation(ValidationErrors::single("slug", SLUG_TAKEN))
        }
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    locations: Arc<dyn LocationRepository>,
}

impl CatalogService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        locations: Arc<dyn LocationRepository>,
    ) -> Self {
        Self {
            categories,
            locations,
        }
    }

    pub async fn published_categories(&self) -> DomainResult<Vec<Category>> {
        Ok(self.categories.list(true).await?)
    }

    pub async fn published_locations(&self) -> DomainResult<Vec<Location>> {
        Ok(self.locations.list(true).await?)
    }

    async fn validate_category(&self, form: &CategoryForm, exclude: Option<Uuid>) -> DomainResult<()> {
        let mut errors = form.validate();
        if !errors.has("slug") {
            if let Some(existing) = self.categories.find_by_slug(&form.slug).await? {
                if Some(existing.id) != exclude {
                    errors.add("slug", SLUG_TAKEN);
                }
            }
        }
        errors.into_result().map_err(DomainError::Validation)
    }

    pub async fn create_category(
        &self,
        viewer: Option<&Viewer>,
        form: CategoryForm,
    ) -> DomainResult<Category> {
        require_staff(viewer)?;
        self.validate_category(&form, None).await?;

        let mut category = Category::new(form.title, form.description, form.slug);
        category.is_published = form.is_published;
        let category = self.categories.create(category).await.map_err(slug_taken)?;

        tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    pub async fn update_category(
        &self,
        viewer: Option<&Viewer>,
        id: Uuid,
        form: CategoryForm,
    ) -> DomainResult<Category> {
        require_staff(viewer)?;
        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("category", id))?;
        self.validate_category(&form, Some(id)).await?;

        category.title = form.title;
        category.description = form.description;
        category.slug = form.slug;
        category.is_published = form.is_published;
        let category = self.categories.update(category).await.map_err(slug_taken)?;

        tracing::info!(category_id = %id, "Category updated");
        Ok(category)
    }

    /// Posts in the category survive without one.
    pub async fn delete_category(&self, viewer: Option<&Viewer>, id: Uuid) -> DomainResult<()> {
        require_staff(viewer)?;
        match self.categories.delete(id).await {
            Err(RepoError::NotFound) => Err(DomainError::not_found("category", id)),
            other => Ok(other?),
        }
    }

    pub async fn create_location(
        &self,
        viewer: Option<&Viewer>,
        form: LocationForm,
    ) -> DomainResult<Location> {
        require_staff(viewer)?;
        form.validate()
            .into_result()
            .map_err(DomainError::Validation)?;

        let mut location = Location::new(form.name);
        location.is_published = form.is_published;
        let location = self.locations.create(location).await?;

        tracing::info!(location_id = %location.id, "Location created");
        Ok(location)
    }

    pub async fn update_location(
        &self,
        viewer: Option<&Viewer>,
        id: Uuid,
        form: LocationForm,
    ) -> DomainResult<Location> {
        require_staff(viewer)?;
        let mut location = self
            .locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("location", id))?;
        form.validate()
            .into_result()
            .map_err(DomainError::Validation)?;

        location.name = form.name;
        location.is_published = form.is_published;
        Ok(self.locations.update(location).await?)
    }

    /// Posts at the location survive without one.
    pub async fn delete_location(&self, viewer: Option<&Viewer>, id: Uuid) -> DomainResult<()> {
        require_staff(viewer)?;
        match self.locations.delete(id).await {
            Err(RepoError::NotFound) => Err(DomainError::not_found("location", id)),
            other => Ok(other?),
        }
    }
}
