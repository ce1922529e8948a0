//! Typed integer ids.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Integer identifier tagged with the entity it identifies.
pub struct TypedId<T>(i64, PhantomData<T>);

impl<T> TypedId<T> {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id, PhantomData)
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Remote identities are positive; anything else is treated as absent.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl<T> Clone for TypedId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedId<T> {}

impl<T> Debug for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&self.0, f)
    }
}

impl<T> Display for TypedId<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for TypedId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for TypedId<T> {}

impl<T> Hash for TypedId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> PartialOrd for TypedId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> From<i64> for TypedId<T> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<T> From<TypedId<T>> for i64 {
    fn from(value: TypedId<T>) -> Self {
        value.get()
    }
}

impl<T> FromStr for TypedId<T> {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<i64>().map(Self::new)
    }
}

impl<T> Serialize for TypedId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de, T> Deserialize<'de> for TypedId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker for [`TenantId`].
#[derive(Debug)]
pub enum TenantEntity {}

/// Identifier of a tenant (company) account.
pub type TenantId = TypedId<TenantEntity>;

/// Marker for [`ProductId`].
#[derive(Debug)]
pub enum ProductEntity {}

/// Identifier of a catalog product.
pub type ProductId = TypedId<ProductEntity>;

/// Marker for [`CategoryId`].
#[derive(Debug)]
pub enum CategoryEntity {}

/// Identifier of a product category.
pub type CategoryId = TypedId<CategoryEntity>;

/// Marker for [`UserId`].
#[derive(Debug)]
pub enum UserEntity {}

/// Identifier of a staff or platform user.
pub type UserId = TypedId<UserEntity>;

/// Marker for [`CustomerId`].
#[derive(Debug)]
pub enum CustomerEntity {}

/// Identifier of an end client of a tenant storefront.
pub type CustomerId = TypedId<CustomerEntity>;

/// Marker for [`SaleId`].
#[derive(Debug)]
pub enum SaleEntity {}

/// Identifier of a confirmed sale.
pub type SaleId = TypedId<SaleEntity>;

/// Marker for [`NotificationId`].
#[derive(Debug)]
pub enum NotificationEntity {}

/// Identifier of a notification.
pub type NotificationId = TypedId<NotificationEntity>;
