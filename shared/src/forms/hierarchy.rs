use validator::Validate;

use super::rules::required;
use super::{required_id, FieldErrors, FormContext, FormSchema};
use crate::{Hierarchy, HierarchyPayload};

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct HierarchyForm {
    #[validate(custom(function = "required", message = "Select a manager"))]
    pub manager: String,
    #[validate(custom(function = "required", message = "Select a collection officer"))]
    pub collection_officer: String,
}

impl HierarchyForm {
    pub fn from_entity(hierarchy: &Hierarchy) -> Self {
        Self {
            manager: hierarchy.manager.to_string(),
            collection_officer: hierarchy.collection_officer.to_string(),
        }
    }
}

impl FormSchema for HierarchyForm {
    type Payload = HierarchyPayload;

    fn refine(&self, _ctx: &FormContext, errors: &mut FieldErrors) {
        if !self.manager.is_empty() && self.manager == self.collection_officer {
            errors.insert("collection_officer", "Manager and officer must be different users");
        }
    }

    fn to_payload(&self, _ctx: &FormContext) -> Result<HierarchyPayload, FieldErrors> {
        Ok(HierarchyPayload {
            manager: required_id("manager", &self.manager)?,
            collection_officer: required_id("collection_officer", &self.collection_officer)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::test_support::ctx;

    #[test]
    fn test_pair_must_be_distinct() {
        let form = HierarchyForm {
            manager: "3".into(),
            collection_officer: "3".into(),
        };
        assert!(form.check(&ctx()).unwrap_err().contains("collection_officer"));

        let payload = HierarchyForm {
            manager: "3".into(),
            collection_officer: "9".into(),
        }
        .check(&ctx())
        .unwrap();
        assert_eq!(payload.collection_officer.as_str(), "9");
    }

    #[test]
    fn test_both_required() {
        let errors = HierarchyForm::default().check(&ctx()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
