//! Create/edit workflow shared by every entity form.
//!
//! An [`EntityEditor`] holds one [`Draft`] at a time. Opening it without a
//! record starts from the draft's blank defaults; opening it with a record
//! copies every field into the draft. Submitting validates the draft and
//! either appends a new record or replaces the record being edited.
//!
//! The HTTP create, update and profile handlers run request bodies through
//! the same session via [`EntityEditor::fill`] and [`EntityEditor::build`].

use thiserror::Error;

use crate::model::{generate_id, Entity};
use crate::validate::FieldErrors;

/// Form state for one entity type.
pub trait Draft: Default + Clone {
    type Record: Entity;

    /// A form with documented defaults and no editing target.
    #[must_use]
    fn blank() -> Self {
        Self::default()
    }

    /// Populate a form from an existing record.
    fn from_record(record: &Self::Record) -> Self;

    /// Validate the form and build a record carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] describing every rule the form breaks.
    fn into_record(&self, id: String) -> Result<Self::Record, FieldErrors>;

    /// Copy fields this draft leaves unset from the record being edited.
    ///
    /// Only fields a form never shows (tracking counters, generated codes,
    /// creation dates) need an override; the default keeps the draft as is.
    fn keep_unset_from(&mut self, _existing: &Self::Record) {}

    /// Validate without keeping the built record.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] describing every rule the form breaks.
    fn validate(&self) -> Result<(), FieldErrors> {
        self.into_record(String::new()).map(|_| ())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Invalid(FieldErrors),
    #[error("record '{0}' is no longer in the collection")]
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct EntityEditor<D: Draft> {
    draft: D,
    editing: Option<D::Record>,
}

impl<D: Draft> Default for EntityEditor<D> {
    fn default() -> Self {
        Self {
            draft: D::blank(),
            editing: None,
        }
    }
}

impl<D: Draft> EntityEditor<D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a create (`None`) or edit (`Some(record)`) session.
    pub fn open(&mut self, record: Option<&D::Record>) {
        match record {
            Some(r) => {
                self.draft = D::from_record(r);
                self.editing = Some(r.clone());
            }
            None => {
                self.draft = D::blank();
                self.editing = None;
            }
        }
    }

    #[must_use]
    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Replace the whole form, e.g. with a submitted request body. Fields
    /// the new draft leaves unset keep the values of the record being edited.
    pub fn fill(&mut self, mut draft: D) {
        if let Some(original) = &self.editing {
            draft.keep_unset_from(original);
        }
        self.draft = draft;
    }

    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(Entity::id)
    }

    /// Validate the draft and build the record it describes: the edited
    /// record's id when editing, a fresh id otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] describing every rule the draft breaks.
    pub fn build(&self) -> Result<D::Record, FieldErrors> {
        let id = match &self.editing {
            Some(original) => original.id().to_owned(),
            None => generate_id::<D::Record>(),
        };
        self.draft.into_record(id)
    }

    /// Validate the draft and write it into `collection`.
    ///
    /// On success the editor is closed. On failure the collection and the
    /// draft are left untouched so the form can show inline errors.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] if the draft breaks any validation rule.
    /// - [`SubmitError::NotFound`] if the record being edited has been removed.
    pub fn submit(&mut self, collection: &mut Vec<D::Record>) -> Result<D::Record, SubmitError> {
        let record = self.build().map_err(SubmitError::Invalid)?;
        match &self.editing {
            Some(original) => {
                let slot = collection
                    .iter_mut()
                    .find(|r| r.id() == original.id())
                    .ok_or_else(|| SubmitError::NotFound(original.id().to_owned()))?;
                *slot = record.clone();
            }
            None => collection.push(record.clone()),
        }
        self.close();
        Ok(record)
    }

    /// Reset to blank defaults and clear the editing target.
    pub fn close(&mut self) {
        self.draft = D::blank();
        self.editing = None;
    }
}
