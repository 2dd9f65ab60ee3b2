// Scope state machine
//
// Exactly one scope is active at a time. Region clicks toggle department
// selection; municipality selection nests under a department and is reset by
// any department-scope transition.

use crate::records::DeptScoped;
use crate::{Result, TableroError};
use serde::{Deserialize, Serialize};

/// The active geographic selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    National,
    Department {
        code: String,
        name: String,
    },
    Municipality {
        dept_code: String,
        dept_name: String,
        muni_code: String,
    },
}

impl Scope {
    /// Department code of the current selection, if any
    pub fn dept_code(&self) -> Option<&str> {
        match self {
            Scope::National => None,
            Scope::Department { code, .. } => Some(code),
            Scope::Municipality { dept_code, .. } => Some(dept_code),
        }
    }

    /// Department display name of the current selection, if any
    pub fn dept_name(&self) -> Option<&str> {
        match self {
            Scope::National => None,
            Scope::Department { name, .. } => Some(name),
            Scope::Municipality { dept_name, .. } => Some(dept_name),
        }
    }

    /// Selected municipality code, if drilled down that far
    pub fn muni_code(&self) -> Option<&str> {
        match self {
            Scope::Municipality { muni_code, .. } => Some(muni_code),
            _ => None,
        }
    }

    /// Whether a dataset record falls inside this scope.
    /// National matches everything; otherwise the record's department code
    /// must equal the selected one. Records without a code are excluded
    /// under a department scope.
    pub fn matches<R: DeptScoped>(&self, record: &R) -> bool {
        match self.dept_code() {
            None => true,
            Some(code) => record.dept_code() == Some(code),
        }
    }

    /// Outcome of a map region click. Clicking the already-active
    /// department clears the selection (toggle); any other click selects
    /// that department. Municipality sub-state never survives.
    pub fn after_region_click(&self, name: &str, code: &str) -> RegionClick {
        if self.dept_code() == Some(code) {
            RegionClick::Cleared
        } else {
            RegionClick::Selected {
                code: code.to_string(),
                name: name.to_string(),
            }
        }
    }

    /// Next scope after a municipality click. Requires a department to be
    /// selected; clicking the active municipality toggles back to the
    /// department level.
    pub fn after_municipality_click(&self, muni_code: &str) -> Result<Scope> {
        match self {
            Scope::National => Err(TableroError::ScopeError(
                "municipality selection requires a department".to_string(),
            )),
            Scope::Department { code, name } => Ok(Scope::Municipality {
                dept_code: code.clone(),
                dept_name: name.clone(),
                muni_code: muni_code.to_string(),
            }),
            Scope::Municipality {
                dept_code,
                dept_name,
                muni_code: current,
            } => {
                if current == muni_code {
                    Ok(Scope::Department {
                        code: dept_code.clone(),
                        name: dept_name.clone(),
                    })
                } else {
                    Ok(Scope::Municipality {
                        dept_code: dept_code.clone(),
                        dept_name: dept_name.clone(),
                        muni_code: muni_code.to_string(),
                    })
                }
            }
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Scope::National
    }
}

/// What a map region click does to the department selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionClick {
    /// A department was selected
    Selected { code: String, name: String },
    /// The active department was clicked again; back to the national scope
    Cleared,
}

impl RegionClick {
    /// Scope this outcome lands on
    pub fn scope(&self) -> Scope {
        match self {
            RegionClick::Selected { code, name } => Scope::Department {
                code: code.clone(),
                name: name.clone(),
            },
            RegionClick::Cleared => Scope::National,
        }
    }
}
