// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrative category lifecycle: create, rename, reparent.
//!
//! Every mutation re-validates the hierarchy against the current rows
//! before persisting, so cycles are rejected before they ever reach the
//! store.

use crate::category_tree::validate_parent;
use crate::error::CoreError;
use crate::store::QuestionStore;
use quizdeck_domain::{Category, DomainError, validate_category_name};
use tracing::info;

/// Finds a category row by id.
fn find_category(rows: &[Category], id: i64) -> Result<Category, DomainError> {
    rows.iter()
        .find(|category| category.id == id)
        .cloned()
        .ok_or(DomainError::CategoryNotFound(id))
}

/// Creates a new category.
///
/// # Arguments
///
/// * `store` - The question store
/// * `name` - The category name (1-100 characters)
/// * `parent_id` - The parent category, or `None` for a root
///
/// # Errors
///
/// Returns an error if:
/// - The name is invalid
/// - The parent does not exist
/// - The store cannot be reached in time
pub fn create_category<S>(
    store: &S,
    name: String,
    parent_id: Option<i64>,
) -> Result<Category, CoreError>
where
    S: QuestionStore,
{
    validate_category_name(&name)?;

    if let Some(parent) = parent_id {
        let rows: Vec<Category> = store.list_categories()?;
        find_category(&rows, parent)?;
    }

    let saved: Category = store.save_category(Category::new(name, parent_id))?;
    info!(category_id = saved.id, name = %saved.name, "Category created");
    Ok(saved)
}

/// Renames an existing category.
///
/// # Arguments
///
/// * `store` - The question store
/// * `category_id` - The category to rename
/// * `name` - The new name (1-100 characters)
///
/// # Errors
///
/// Returns an error if:
/// - The name is invalid
/// - The category does not exist
/// - The store cannot be reached in time
pub fn rename_category<S>(store: &S, category_id: i64, name: String) -> Result<Category, CoreError>
where
    S: QuestionStore,
{
    validate_category_name(&name)?;

    let rows: Vec<Category> = store.list_categories()?;
    let mut category: Category = find_category(&rows, category_id)?;
    category.name = name;

    let saved: Category = store.save_category(category)?;
    info!(category_id = saved.id, name = %saved.name, "Category renamed");
    Ok(saved)
}

/// Moves a category under a new parent.
///
/// The assignment is validated with a full ancestor walk: a category can
/// never become its own parent, directly or transitively.
///
/// # Arguments
///
/// * `store` - The question store
/// * `category_id` - The category to move
/// * `new_parent_id` - The new parent, or `None` to make it a root
///
/// # Errors
///
/// Returns an error if:
/// - The category or the new parent does not exist
/// - The assignment would create a cycle (`HierarchyCycle`)
/// - The store cannot be reached in time
pub fn reparent_category<S>(
    store: &S,
    category_id: i64,
    new_parent_id: Option<i64>,
) -> Result<Category, CoreError>
where
    S: QuestionStore,
{
    let rows: Vec<Category> = store.list_categories()?;
    let mut category: Category = find_category(&rows, category_id)?;

    if let Some(parent) = new_parent_id {
        find_category(&rows, parent)?;
    }
    validate_parent(category_id, new_parent_id, &rows)?;

    category.parent_id = new_parent_id;
    let saved: Category = store.save_category(category)?;
    info!(
        category_id = saved.id,
        parent_id = ?saved.parent_id,
        "Category reparented"
    );
    Ok(saved)
}
