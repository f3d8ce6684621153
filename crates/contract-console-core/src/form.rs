//! Call form state: selected function plus one raw text slot per input.

use thiserror::Error;

use crate::domain::FunctionDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The requested name is not in the current descriptor set. This is a
    /// real error rather than a no-op: it means the interface set changed
    /// underneath a stale selection.
    #[error("function not found in current interface: {name}")]
    Selection { name: String },
    #[error("parameter index {index} out of range (function has {count} inputs)")]
    Index { index: usize, count: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallForm {
    #[default]
    NoSelection,
    Selected {
        function: FunctionDescriptor,
        raw_params: Vec<String>,
    },
}

impl CallForm {
    pub fn new() -> Self {
        CallForm::NoSelection
    }

    /// Select `name` out of `functions`, resetting the parameter slots to one
    /// empty string per input. The reset happens atomically with selection;
    /// a failed lookup leaves the previous state untouched.
    pub fn select_function(
        &mut self,
        functions: &[FunctionDescriptor],
        name: &str,
    ) -> Result<(), FormError> {
        let function = functions
            .iter()
            .find(|f| f.name == name)
            .cloned()
            .ok_or_else(|| FormError::Selection {
                name: name.to_owned(),
            })?;
        let raw_params = vec![String::new(); function.inputs.len()];
        *self = CallForm::Selected {
            function,
            raw_params,
        };
        Ok(())
    }

    /// Replace exactly one parameter slot, leaving the others untouched.
    pub fn edit_param(&mut self, index: usize, value: String) -> Result<(), FormError> {
        match self {
            CallForm::NoSelection => Err(FormError::Index { index, count: 0 }),
            CallForm::Selected { raw_params, .. } => {
                let count = raw_params.len();
                let slot = raw_params
                    .get_mut(index)
                    .ok_or(FormError::Index { index, count })?;
                *slot = value;
                Ok(())
            }
        }
    }

    /// Drop any selection, e.g. when the interface set is replaced.
    pub fn clear(&mut self) {
        *self = CallForm::NoSelection;
    }

    pub fn selected(&self) -> Option<&FunctionDescriptor> {
        match self {
            CallForm::NoSelection => None,
            CallForm::Selected { function, .. } => Some(function),
        }
    }

    pub fn raw_params(&self) -> &[String] {
        match self {
            CallForm::NoSelection => &[],
            CallForm::Selected { raw_params, .. } => raw_params,
        }
    }

    /// True once a function is selected and every slot has non-blank text.
    pub fn is_ready_to_submit(&self) -> bool {
        match self {
            CallForm::NoSelection => false,
            CallForm::Selected { raw_params, .. } => {
                raw_params.iter().all(|p| !p.trim().is_empty())
            }
        }
    }
}
