use std::future::Future;

/// Error type returned by store implementations.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Consumer-provided persisted storage.
///
/// String keys, string values. Absence is `None`, never a sentinel string.
///
/// # Example
///
/// ```rust,ignore
/// impl KeyValueStore for Preferences {
///     async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
///         Ok(self.db.read(key).await?)
///     }
///     // set / remove / clear ...
/// }
/// ```
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read a value.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Insert or overwrite a value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove every value.
    fn clear(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
