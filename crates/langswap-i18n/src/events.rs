//! Change notifications pushed from the store to the host.

/// Something the host may want to react to, such as re-rendering text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageEvent {
    /// A record was stored, either new or replacing an older one.
    Upserted {
        /// Language code of the stored record
        code: String,
        /// Whether an earlier record for the code was replaced
        replaced: bool,
    },
    /// The active selection changed.
    ActiveChanged {
        /// Selection before the change
        previous: Option<String>,
        /// Selection after the change
        current: Option<String>,
    },
    /// The active language's record was hot swapped; displayed text should
    /// be resolved again.
    ActiveReloaded {
        /// Active language code
        code: String,
    },
}

impl LanguageEvent {
    /// Whether text already shown to the user may now be stale.
    pub const fn requires_refresh(&self) -> bool {
        matches!(self, Self::ActiveChanged { .. } | Self::ActiveReloaded { .. })
    }
}
