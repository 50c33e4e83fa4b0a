//! Replay scripts.
//!
//! A script is a YAML list of operations against the shop, applied in order:
//!
//! ```yaml
//! - op: create_user
//!   ref: alice
//!   name: Alice
//!   email: alice@example.com
//!   password: password123
//! - op: create_product
//!   ref: widget
//!   name: Widget
//!   price: "50.00"
//! - op: create_order
//!   ref: first
//!   user: "@alice"
//!   items:
//!     - product: "@widget"
//!       quantity: 2
//!       unit_price: "50.00"
//!   payment:
//!     method: card
//!     amount: "100.00"
//!     validated: true
//! - op: delete_order
//!   order: "@first"
//! ```
//!
//! Create operations may bind the new record's ID to a name with `ref`.
//! Anywhere an ID is expected, `@name` refers to a bound ID and anything else
//! is parsed as a UUID.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use hardstop_core::{OrderStatus, Price};
use hardstop_shop::models::{
    CartLineInput, CategoryInput, OrderInput, PaymentInput, ProductInput, UserInput,
};
use hardstop_shop::{AppState, ShopError};

/// Errors raised while replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// `@name` used before anything was bound to it.
    #[error("unknown reference @{0}")]
    UnknownRef(String),

    /// `ref: name` used twice.
    #[error("reference @{0} is already bound")]
    DuplicateRef(String),

    /// A plain ID that is not a UUID.
    #[error("invalid id '{value}': {source}")]
    InvalidId {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// The shop rejected the operation.
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// A step failed; wraps the cause with its position in the script.
    #[error("step {index} ({op}) failed: {source}")]
    Step {
        index: usize,
        op: &'static str,
        #[source]
        source: Box<Self>,
    },
}

/// One cart line of an order step.
#[derive(Debug, Clone, Deserialize)]
pub struct LineStep {
    pub product: String,
    pub quantity: u32,
    pub unit_price: Price,
}

/// Payment details of an order step. `paid_at` defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentStep {
    pub method: String,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    pub amount: Price,
    #[serde(default)]
    pub validated: bool,
}

/// Body shared by `create_order` and `update_order`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStep {
    #[serde(default)]
    pub ordered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<LineStep>,
    pub payment: PaymentStep,
}

/// A single script operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateUser {
        #[serde(rename = "ref")]
        alias: Option<String>,
        name: String,
        email: String,
        password: String,
    },
    UpdateUser {
        user: String,
        name: String,
        email: String,
        password: String,
    },
    DeleteUser {
        user: String,
    },
    CreateCategory {
        #[serde(rename = "ref")]
        alias: Option<String>,
        name: String,
    },
    DeleteCategory {
        category: String,
    },
    CreateProduct {
        #[serde(rename = "ref")]
        alias: Option<String>,
        name: String,
        #[serde(default)]
        description: String,
        price: Price,
        #[serde(default)]
        stock: u32,
        category: Option<String>,
    },
    DeleteProduct {
        product: String,
    },
    CreateOrder {
        #[serde(rename = "ref")]
        alias: Option<String>,
        user: String,
        #[serde(flatten)]
        order: OrderStep,
    },
    UpdateOrder {
        order: String,
        #[serde(flatten)]
        details: OrderStep,
    },
    DeleteOrder {
        order: String,
    },
    AddFavorite {
        user: String,
        product: String,
    },
    RemoveFavorite {
        user: String,
        product: String,
    },
}

impl Step {
    /// The `op` tag of this step.
    #[must_use]
    pub const fn op(&self) -> &'static str {
        match self {
            Self::CreateUser { .. } => "create_user",
            Self::UpdateUser { .. } => "update_user",
            Self::DeleteUser { .. } => "delete_user",
            Self::CreateCategory { .. } => "create_category",
            Self::DeleteCategory { .. } => "delete_category",
            Self::CreateProduct { .. } => "create_product",
            Self::DeleteProduct { .. } => "delete_product",
            Self::CreateOrder { .. } => "create_order",
            Self::UpdateOrder { .. } => "update_order",
            Self::DeleteOrder { .. } => "delete_order",
            Self::AddFavorite { .. } => "add_favorite",
            Self::RemoveFavorite { .. } => "remove_favorite",
        }
    }

    const fn alias(&self) -> Option<&String> {
        match self {
            Self::CreateUser { alias, .. }
            | Self::CreateCategory { alias, .. }
            | Self::CreateProduct { alias, .. }
            | Self::CreateOrder { alias, .. } => alias.as_ref(),
            _ => None,
        }
    }
}

/// Parse a YAML script.
///
/// # Errors
///
/// Returns the YAML error if the document is not a list of known operations.
pub fn parse(yaml: &str) -> Result<Vec<Step>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Counts from a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub rejected: usize,
}

/// Applies steps to an [`AppState`], remembering `ref` bindings.
pub struct Replay<'a> {
    state: &'a AppState,
    refs: HashMap<String, Uuid>,
}

impl<'a> Replay<'a> {
    #[must_use]
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            refs: HashMap::new(),
        }
    }

    /// ID bound to `name`, if any.
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<Uuid> {
        self.refs.get(name).copied()
    }

    /// Apply every step in order.
    ///
    /// With `keep_going`, a rejected step is logged and skipped; otherwise
    /// the replay stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Step` for the first failing step unless
    /// `keep_going` is set.
    pub async fn run(
        &mut self,
        steps: &[Step],
        keep_going: bool,
    ) -> Result<ReplaySummary, ScriptError> {
        let mut summary = ReplaySummary::default();
        for (index, step) in steps.iter().enumerate() {
            match self.apply(step).await {
                Ok(()) => summary.applied += 1,
                Err(source) => {
                    let err = ScriptError::Step {
                        index,
                        op: step.op(),
                        source: Box::new(source),
                    };
                    if !keep_going {
                        return Err(err);
                    }
                    warn!(error = %err, "Skipping rejected step");
                    summary.rejected += 1;
                }
            }
        }
        info!(applied = summary.applied, rejected = summary.rejected, "Replay finished");
        Ok(summary)
    }

    /// Apply a single step.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference does not resolve or the shop rejects
    /// the operation. A rejected step binds nothing.
    pub async fn apply(&mut self, step: &Step) -> Result<(), ScriptError> {
        if let Some(alias) = step.alias()
            && self.refs.contains_key(alias)
        {
            return Err(ScriptError::DuplicateRef(alias.clone()));
        }

        let created: Option<Uuid> = match step {
            Step::CreateUser {
                name,
                email,
                password,
                ..
            } => {
                let user = self
                    .state
                    .users()
                    .create(UserInput {
                        name: name.clone(),
                        email: email.clone(),
                        password: password.clone(),
                    })
                    .await;
                Some(user.id.into())
            }
            Step::UpdateUser {
                user,
                name,
                email,
                password,
            } => {
                let input = UserInput {
                    name: name.clone(),
                    email: email.clone(),
                    password: password.clone(),
                };
                self.state.users().update(self.resolve(user)?, input).await?;
                None
            }
            Step::DeleteUser { user } => {
                self.state.users().delete(self.resolve(user)?).await?;
                None
            }
            Step::CreateCategory { name, .. } => {
                let category = self
                    .state
                    .categories()
                    .create(CategoryInput { name: name.clone() })
                    .await;
                Some(category.id.into())
            }
            Step::DeleteCategory { category } => {
                self.state.categories().delete(self.resolve(category)?).await?;
                None
            }
            Step::CreateProduct {
                name,
                description,
                price,
                stock,
                category,
                ..
            } => {
                let category_id = category.as_deref().map(|c| self.resolve(c)).transpose()?;
                let product = self
                    .state
                    .products()
                    .create(ProductInput {
                        name: name.clone(),
                        description: description.clone(),
                        price: *price,
                        stock: *stock,
                        category_id,
                    })
                    .await?;
                Some(product.id.into())
            }
            Step::DeleteProduct { product } => {
                self.state.products().delete(self.resolve(product)?).await?;
                None
            }
            Step::CreateOrder { user, order, .. } => {
                let input = self.order_input(order)?;
                let details = self.state.orders().create(self.resolve(user)?, input).await?;
                Some(details.id().into())
            }
            Step::UpdateOrder { order, details } => {
                let input = self.order_input(details)?;
                self.state.orders().update(self.resolve(order)?, input).await?;
                None
            }
            Step::DeleteOrder { order } => {
                self.state.orders().delete(self.resolve(order)?).await?;
                None
            }
            Step::AddFavorite { user, product } => {
                self.state
                    .users()
                    .add_favorite(self.resolve(user)?, self.resolve(product)?)
                    .await?;
                None
            }
            Step::RemoveFavorite { user, product } => {
                self.state
                    .users()
                    .remove_favorite(self.resolve(user)?, self.resolve(product)?)
                    .await?;
                None
            }
        };

        if let (Some(alias), Some(id)) = (step.alias(), created) {
            self.refs.insert(alias.clone(), id);
        }
        Ok(())
    }

    /// Resolve `@name` or a literal UUID into a typed ID.
    fn resolve<I: From<Uuid>>(&self, reference: &str) -> Result<I, ScriptError> {
        if let Some(name) = reference.strip_prefix('@') {
            return self
                .binding(name)
                .map(I::from)
                .ok_or_else(|| ScriptError::UnknownRef(name.to_string()));
        }
        reference
            .parse::<Uuid>()
            .map(I::from)
            .map_err(|source| ScriptError::InvalidId {
                value: reference.to_string(),
                source,
            })
    }

    fn order_input(&self, step: &OrderStep) -> Result<OrderInput, ScriptError> {
        let now = Utc::now();
        let items = step
            .items
            .iter()
            .map(|line| {
                Ok(CartLineInput {
                    product_id: self.resolve(&line.product)?,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
            })
            .collect::<Result<Vec<_>, ScriptError>>()?;

        Ok(OrderInput {
            ordered_at: step.ordered_at.unwrap_or(now),
            status: step.status,
            items,
            payment: PaymentInput {
                method: step.payment.method.clone(),
                paid_at: step.payment.paid_at.unwrap_or(now),
                amount: step.payment.amount,
                validated: step.payment.validated,
            },
        })
    }
}
