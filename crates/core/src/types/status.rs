//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// A status code that does not map to any [`OrderStatus`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid order status code: {0} (expected 0-4)")]
pub struct InvalidStatusCode(pub i32);

/// Order lifecycle status.
///
/// Carried on the wire as its integer code (`Pending` = 0 through
/// `Cancelled` = 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in code order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Integer code of this status.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Pending => 0,
            Self::Processing => 1,
            Self::Shipped => 2,
            Self::Completed => 3,
            Self::Cancelled => 4,
        }
    }
}

impl TryFrom<i32> for OrderStatus {
    type Error = InvalidStatusCode;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Processing),
            2 => Ok(Self::Shipped),
            3 => Ok(Self::Completed),
            4 => Ok(Self::Cancelled),
            _ => Err(InvalidStatusCode(code)),
        }
    }
}

impl From<OrderStatus> for i32 {
    fn from(status: OrderStatus) -> Self {
        status.code()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_position() {
        for (code, status) in (0..).zip(OrderStatus::ALL) {
            assert_eq!(status.code(), code);
            assert_eq!(OrderStatus::try_from(code).unwrap(), status);
        }
    }

    #[test]
    fn test_out_of_range_code() {
        assert_eq!(OrderStatus::try_from(5), Err(InvalidStatusCode(5)));
        assert_eq!(OrderStatus::try_from(-1), Err(InvalidStatusCode(-1)));
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_serde_uses_integer_code() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "2");

        let parsed: OrderStatus = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);

        assert!(serde_json::from_str::<OrderStatus>("7").is_err());
    }

    #[test]
    fn test_display_from_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("lost".parse::<OrderStatus>().is_err());
    }
}
