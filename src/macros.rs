//! Macros for declaring typed state keys.

/// Declare an enum of state keys convertible to [`StateKey`](crate::core::StateKey).
///
/// # Example
///
/// ```
/// use viewstate::state_keys;
/// use viewstate::effects::ViewStateMachine;
///
/// state_keys! {
///     pub enum Screen {
///         Loading = 0,
///         Content = 1,
///         Error = 2,
///     }
/// }
///
/// let mut machine = ViewStateMachine::default();
/// machine.state(Screen::Loading, |s| s)?.state(Screen::Content, |s| s)?;
/// machine.config_mut().set_initial_state(Screen::Loading)?;
/// machine.start()?;
/// machine.change_state(Screen::Content)?;
///
/// let current = machine.current_state_key().and_then(Screen::from_key);
/// assert_eq!(current, Some(Screen::Content));
/// # Ok::<(), viewstate::core::MachineError>(())
/// ```
#[macro_export]
macro_rules! state_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $key:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every key, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];

            pub fn key(self) -> $crate::core::StateKey {
                match self {
                    $(Self::$variant => $key),*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub fn from_key(key: $crate::core::StateKey) -> Option<Self> {
                match key {
                    $($key => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl From<$name> for $crate::core::StateKey {
            fn from(value: $name) -> Self {
                value.key()
            }
        }
    };
}
