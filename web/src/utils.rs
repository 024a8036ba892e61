use gloo::storage::{LocalStorage, Storage};
use lexigrid_core::Leaderboard;
use serde::Serialize;
use yew::prelude::*;

/// Types persisted in local storage under a fixed key.
pub trait StorageKey {
    const KEY: &'static str;
}

impl StorageKey for Leaderboard {
    const KEY: &'static str = Leaderboard::STORAGE_KEY;
}

pub trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("Could not save {} to local storage: {:?}", T::KEY, err);
        }
    }
}

/// Raw stored JSON for `T`, `None` when missing or when storage is unavailable.
pub fn local_raw<T: StorageKey>() -> Option<String> {
    match LocalStorage::raw().get_item(T::KEY) {
        Ok(value) => value,
        Err(err) => {
            log::error!("Could not read {} from local storage: {:?}", T::KEY, err);
            None
        }
    }
}

pub fn load_leaderboard(capacity: usize) -> Leaderboard {
    Leaderboard::load_or_default(local_raw::<Leaderboard>().as_deref(), capacity)
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Numeric seeds are used as is, anything else is hashed (FNV-1a) so words work as seeds too.
pub(crate) fn seed_from_str(seed: &str) -> u64 {
    seed.parse().unwrap_or_else(|_| {
        seed.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_seeds_are_taken_literally() {
        assert_eq!(seed_from_str("42"), 42);
    }

    #[test]
    fn text_seeds_are_stable_and_distinct() {
        assert_eq!(seed_from_str("apple"), seed_from_str("apple"));
        assert_ne!(seed_from_str("apple"), seed_from_str("apples"));
    }

    #[test]
    fn leaderboard_uses_plain_storage_key() {
        assert_eq!(<Leaderboard as StorageKey>::KEY, "leaderboard");
    }
}
