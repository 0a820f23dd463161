use std::collections::HashSet;

use crate::errors::{CoreError, CoreResult, FieldErrors};

pub const MAX_CHAR_FIELD_LENGTH: usize = 255;
pub const MAX_USERNAME_LENGTH: usize = 150;

pub const BLANK_FIELD: &str = "This field may not be blank.";
pub const DUPLICATE_INGREDIENT_NAME: &str = "ingredient with this name already exists.";
pub const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

/// Input for a new ingredient, trimmed and checked
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedIngredient {
    pub name: String,
    pub description: String,
}

/// Partial ingredient update; `None` leaves the stored value untouched
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngredientChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl IngredientChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRecipe {
    pub title: String,
    pub description: String,
    /// Requested ingredient ids, deduplicated, in first-seen order
    pub ingredient_ids: Vec<i32>,
}

/// Input shaping for create/update operations. Store-dependent checks
/// (name uniqueness) live in the owning service.
pub struct ValidationService;

impl ValidationService {
    pub fn ingredient(name: &str, description: Option<&str>) -> CoreResult<ValidatedIngredient> {
        let mut errors = FieldErrors::new();
        let name = char_field(&mut errors, "name", name, MAX_CHAR_FIELD_LENGTH);
        let description = text_field(description);

        match name {
            Some(name) if errors.is_empty() => Ok(ValidatedIngredient { name, description }),
            _ => Err(CoreError::validation(errors)),
        }
    }

    pub fn ingredient_changes(
        name: Option<&str>,
        description: Option<&str>,
    ) -> CoreResult<IngredientChanges> {
        let mut errors = FieldErrors::new();
        let name = name.and_then(|name| char_field(&mut errors, "name", name, MAX_CHAR_FIELD_LENGTH));

        if !errors.is_empty() {
            return Err(CoreError::validation(errors));
        }

        Ok(IngredientChanges {
            name,
            description: description.map(|d| d.trim().to_string()),
        })
    }

    pub fn recipe(
        title: &str,
        description: Option<&str>,
        ingredient_ids: &[i32],
    ) -> CoreResult<ValidatedRecipe> {
        let mut errors = FieldErrors::new();
        let title = char_field(&mut errors, "title", title, MAX_CHAR_FIELD_LENGTH);

        let mut seen = HashSet::with_capacity(ingredient_ids.len());
        let ids: Vec<i32> = ingredient_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        match title {
            Some(title) if errors.is_empty() => Ok(ValidatedRecipe {
                title,
                description: text_field(description),
                ingredient_ids: ids,
            }),
            _ => Err(CoreError::validation(errors)),
        }
    }

    pub fn username(username: &str) -> CoreResult<String> {
        let mut errors = FieldErrors::new();
        match char_field(&mut errors, "username", username, MAX_USERNAME_LENGTH) {
            Some(username) if errors.is_empty() => Ok(username),
            _ => Err(CoreError::validation(errors)),
        }
    }
}

/// Required single-line field: trimmed, non-blank, bounded length.
fn char_field(errors: &mut FieldErrors, field: &str, value: &str, max: usize) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        errors
            .entry(field.to_string())
            .or_default()
            .push(BLANK_FIELD.to_string());
        return None;
    }

    if trimmed.chars().count() > max {
        errors
            .entry(field.to_string())
            .or_default()
            .push(format!("Ensure this field has no more than {} characters.", max));
        return None;
    }

    Some(trimmed.to_string())
}

fn text_field(value: Option<&str>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreErrorKind;

    fn field_messages(err: &CoreError, field: &str) -> Vec<String> {
        err.field_errors()
            .and_then(|errors| errors.get(field).cloned())
            .unwrap_or_default()
    }

    #[test]
    fn ingredient_is_trimmed_and_description_defaults_to_empty() {
        let validated = ValidationService::ingredient("  Egg  ", None).unwrap();
        assert_eq!(validated.name, "Egg");
        assert_eq!(validated.description, "");
    }

    #[test]
    fn blank_ingredient_name_is_rejected() {
        let err = ValidationService::ingredient("   ", Some("whatever")).unwrap_err();
        assert_eq!(err.kind(), CoreErrorKind::Validation);
        assert_eq!(field_messages(&err, "name"), vec![BLANK_FIELD.to_string()]);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let name = "x".repeat(MAX_CHAR_FIELD_LENGTH + 1);
        let err = ValidationService::ingredient(&name, None).unwrap_err();
        assert_eq!(
            field_messages(&err, "name"),
            vec!["Ensure this field has no more than 255 characters.".to_string()]
        );

        let name = "x".repeat(MAX_CHAR_FIELD_LENGTH);
        assert!(ValidationService::ingredient(&name, None).is_ok());
    }

    #[test]
    fn partial_update_only_touches_supplied_fields() {
        let changes = ValidationService::ingredient_changes(None, Some(" fresh ")).unwrap();
        assert_eq!(changes.name, None);
        assert_eq!(changes.description.as_deref(), Some("fresh"));

        let empty = ValidationService::ingredient_changes(None, None).unwrap();
        assert!(empty.is_empty());

        let err = ValidationService::ingredient_changes(Some(""), None).unwrap_err();
        assert_eq!(field_messages(&err, "name"), vec![BLANK_FIELD.to_string()]);
    }

    #[test]
    fn recipe_ids_are_deduplicated_in_order() {
        let validated = ValidationService::recipe("Omelette", None, &[3, 1, 3, 2, 1]).unwrap();
        assert_eq!(validated.title, "Omelette");
        assert_eq!(validated.ingredient_ids, vec![3, 1, 2]);
    }

    #[test]
    fn recipe_requires_a_title() {
        let err = ValidationService::recipe("", Some("desc"), &[]).unwrap_err();
        assert_eq!(field_messages(&err, "title"), vec![BLANK_FIELD.to_string()]);
    }

    #[test]
    fn username_length_is_bounded() {
        assert_eq!(ValidationService::username(" chef ").unwrap(), "chef");
        let long = "u".repeat(MAX_USERNAME_LENGTH + 1);
        assert!(ValidationService::username(&long).is_err());
    }
}
