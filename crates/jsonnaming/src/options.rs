use crate::policy::{NamingConvention, NamingPolicy};

/// Serializer settings consulted when writing property names.
///
/// The naming policy is read once, when a [`WorkingPolicy`] is built from
/// these options.
///
/// # Examples
///
/// ```rust
/// use jsonnaming::{NamingConvention, SerializerOptions, WorkingPolicy};
///
/// let options = SerializerOptions::with_convention(NamingConvention::CamelCase);
/// let policy = WorkingPolicy::new(Some(&options));
/// assert!(policy.is_span_capable());
/// ```
///
/// # Default
///
/// No naming policy and no buffer clearing.
///
/// [`WorkingPolicy`]: crate::WorkingPolicy
#[derive(Debug, Clone, Default)]
pub struct SerializerOptions {
    /// The policy applied to property names.
    ///
    /// `None` writes names exactly as given.
    ///
    /// # Default
    ///
    /// `None`
    pub naming_policy: Option<NamingPolicy>,

    /// Whether pooled scratch buffers are reset before they are returned to
    /// the shared pool.
    ///
    /// Enable this when property names may carry data that must not linger
    /// in reusable memory. Stack scratch is never cleared.
    ///
    /// # Default
    ///
    /// `false`
    pub clear_buffers: bool,
}

impl SerializerOptions {
    /// Options using one of the built-in conventions.
    #[must_use]
    pub fn with_convention(convention: NamingConvention) -> Self {
        Self {
            naming_policy: Some(convention.into()),
            ..Self::default()
        }
    }

    /// Options using `policy`.
    #[must_use]
    pub fn with_policy(policy: NamingPolicy) -> Self {
        Self {
            naming_policy: Some(policy),
            ..Self::default()
        }
    }
}
