mod app;
use hanzi_app::*;

use app::HanziApp;
use database::db::{self, StoreLoad};

fn main() -> eframe::Result<()> {
    let conn = db::init_database().expect("Failed to initialize database");

    let mut store = match db::load_store(&conn) {
        StoreLoad::Loaded(store) => store,
        StoreLoad::Empty => CategoryStore::new(),
        StoreLoad::Corrupt(e) => {
            eprintln!("Saved categories are unreadable ({e}); starting with an empty store");
            CategoryStore::new()
        }
    };

    if store.is_empty() {
        store.create_category("Animals");
        let _ = store.add_card("Animals", Flashcard::new("dog", "gǒu", "狗"));
        let _ = store.add_card("Animals", Flashcard::new("cat", "māo", "猫"));
        let _ = store.add_card("Animals", Flashcard::new("bird", "niǎo", "鸟"));

        if let Err(e) = db::save_store(&store, &conn) {
            eprintln!("Failed to save sample data: {e}");
        }
        println!("Sample data created!");
    }

    println!("Loaded {} categories from database", store.category_count());
    for name in store.list_categories() {
        println!("  - {} ({} cards)", name, store.get_cards(name).len());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Chinese Character Practice",
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            app::install_cjk_font(&cc.egui_ctx);
            Ok(Box::new(HanziApp::new_with_store(store, conn)))
        }),
    )
}
