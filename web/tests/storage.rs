#![cfg(target_arch = "wasm32")]

use gloo::storage::{LocalStorage, Storage};
use lexigrid_core::Leaderboard;
use lexigrid_web::utils::{LocalSave, StorageKey, load_leaderboard};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn leaderboard_survives_a_reload() {
    LocalStorage::delete(Leaderboard::KEY);

    let mut board = Leaderboard::new(3);
    board.push(200);
    board.push(50);
    board.push(999);
    board.local_save();

    assert_eq!(load_leaderboard(3).scores(), &[999, 200, 50]);
}

#[wasm_bindgen_test]
fn corrupt_leaderboard_loads_empty() {
    LocalStorage::delete(Leaderboard::KEY);
    LocalStorage::raw()
        .set_item(Leaderboard::KEY, "{not json")
        .unwrap();

    assert!(load_leaderboard(3).is_empty());
}

#[wasm_bindgen_test]
fn smaller_capacity_truncates_saved_scores() {
    LocalStorage::delete(Leaderboard::KEY);

    let mut board = Leaderboard::new(5);
    for score in [10, 40, 30, 20] {
        board.push(score);
    }
    board.local_save();

    assert_eq!(load_leaderboard(2).scores(), &[40, 30]);
}
