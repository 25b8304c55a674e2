//! Main application state and logic

use eframe::egui::{self, RichText};
use sqlite_explorer::{export, AssetOpenFailure, CellValue, RowSet, Session, UiEvent};
use std::path::PathBuf;

use crate::panels;
use crate::theme::Theme;

/// Row cap for interactive loads and searches
pub const LOAD_LIMIT: usize = 1000;
/// Row cap for CSV export, effectively "all rows"
pub const EXPORT_LIMIT: usize = 100_000;

const DB_EXTENSIONS: [&str; 3] = ["db", "sqlite", "sqlite3"];

/// UI phase. `open` success moves NoDatabase to DatabaseOpen, any row-fetch
/// success moves to TableLoaded, and `open` can be re-invoked from any
/// phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NoDatabase,
    DatabaseOpen,
    TableLoaded,
}

pub struct ExplorerApp {
    /// Database, assets directory, and outbound events
    pub session: Session,
    /// Cached table list of the open database
    pub tables: Vec<String>,
    /// Table selected in the sidebar
    pub selected_table: Option<String>,
    /// Rows shown in the grid
    pub current_rows: Option<RowSet>,
    /// Search bar state
    pub search_query: String,
    pub show_search: bool,
    pub focus_search: bool,
    /// Status line and error text
    pub status: String,
    pub error: Option<String>,
    /// Recently opened files, newest first (in memory only)
    pub recent_files: Vec<PathBuf>,
    pub show_about: bool,
    theme_applied: bool,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: Session::new(),
            tables: Vec::new(),
            selected_table: None,
            current_rows: None,
            search_query: String::new(),
            show_search: false,
            focus_search: false,
            status: "Open a database to get started.".into(),
            error: None,
            recent_files: Vec::new(),
            show_about: false,
            theme_applied: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.session.is_open() {
            Phase::NoDatabase
        } else if self.current_rows.is_none() {
            Phase::DatabaseOpen
        } else {
            Phase::TableLoaded
        }
    }

    /// Open a database file. On failure the previous database, table list,
    /// and grid stay as they were.
    pub fn open_database(&mut self, path: PathBuf) {
        self.error = None;
        match self.session.open_db(&path) {
            Ok(()) => {
                self.tables = self.session.tables().unwrap_or_default();
                self.selected_table = None;
                self.current_rows = None;
                self.close_search();
                self.add_to_recent(path);
                self.status = format!("Found {} tables.", self.tables.len());
            }
            Err(e) => {
                self.error = Some(format!("Failed to open: {e}"));
                self.status = "Error".into();
            }
        }
    }

    pub fn pick_database(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select SQLite database")
            .add_filter("SQLite DB", &DB_EXTENSIONS)
            .pick_file();
        match picked {
            Some(path) => self.open_database(path),
            None => self.status = "No file selected.".into(),
        }
    }

    pub fn pick_assets_dir(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select the folder containing local assets")
            .pick_folder();
        if let Some(dir) = picked {
            // Emits AssetsDirChanged, handled in dispatch_events
            self.session.set_assets_dir(Some(dir));
        }
    }

    /// Select a table in the sidebar and load it.
    pub fn select_table(&mut self, name: &str) {
        self.selected_table = Some(name.to_string());
        self.load_selected();
    }

    /// Load (or reload, after a search or filter) the selected table.
    pub fn load_selected(&mut self) {
        let Some(table) = self.selected_table.clone() else {
            return;
        };
        self.error = None;
        match self.session.load_rows(&table, Some(LOAD_LIMIT)) {
            Ok(rs) => {
                self.status = format!(
                    "Loaded {} rows, {} columns.",
                    rs.row_count(),
                    rs.column_count()
                );
                self.current_rows = Some(rs);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn run_search(&mut self) {
        let Some(table) = self.selected_table.clone() else {
            self.status = "Select a table before searching.".into();
            return;
        };
        let query = self.search_query.trim().to_string();
        if query.is_empty() {
            self.status = "Enter text to search.".into();
            return;
        }

        self.error = None;
        match self.session.search_rows(&table, &query, Some(LOAD_LIMIT)) {
            Ok(rs) => {
                self.status = format!(
                    "Found {} rows for \"{}\". Reload to restore the full table.",
                    rs.row_count(),
                    query
                );
                self.current_rows = Some(rs);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn close_search(&mut self) {
        self.show_search = false;
        self.search_query.clear();
    }

    /// Follow a foreign key: load the target table filtered on the
    /// referenced column and select it in the sidebar.
    pub fn navigate(&mut self, table: String, column: String, value: CellValue) {
        self.error = None;
        match self
            .session
            .load_rows_filtered(&table, &value, Some(&column))
        {
            Ok(rs) => {
                if self.tables.iter().any(|t| t == &table) {
                    self.selected_table = Some(table.clone());
                }
                self.status = format!("{}: {} rows (filtered).", table, rs.row_count());
                self.current_rows = Some(rs);
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Open a local asset file by name, reporting the outcome as status
    /// text.
    pub fn open_asset(&mut self, file_name: &str) {
        match self.session.open_asset(file_name) {
            Ok(res) if res.opened => {
                self.status = format!("Opened: {}", res.resolved_path.display());
            }
            Ok(res) => match res.reason {
                Some(AssetOpenFailure::LaunchFailed(e)) => {
                    self.status = format!("Could not open {file_name}: {e}");
                }
                _ => self.status = format!("File not found in assets: {file_name}"),
            },
            Err(_) => {
                self.status = "Set the assets folder from the File menu first.".into();
            }
        }
    }

    fn add_to_recent(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(10);
    }

    // === Event handlers ===

    fn on_export_csv(&mut self) {
        let Some(table) = self.selected_table.clone() else {
            self.status = "Load a table before exporting.".into();
            return;
        };

        let rs = match self.session.load_rows(&table, Some(EXPORT_LIMIT)) {
            Ok(rs) => rs,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        let Some(target) = rfd::FileDialog::new()
            .set_file_name(export::csv_file_name(&table))
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            self.status = "Export canceled.".into();
            return;
        };

        let result = std::fs::File::create(&target)
            .map_err(sqlite_explorer::ExplorerError::from)
            .and_then(|mut f| export::row_set_to_csv(&rs, &mut f));
        match result {
            Ok(()) => {
                self.status = format!("Exported {} rows to {}.", rs.row_count(), target.display());
            }
            Err(e) => self.error = Some(format!("Export failed: {e}")),
        }
    }

    fn on_assets_dir_changed(&mut self, dir: Option<PathBuf>) {
        match dir {
            Some(dir) => self.status = format!("Assets folder: {}", dir.display()),
            None => self.status = "Assets folder cleared.".into(),
        }
        // Refresh the grid so asset affordances pick up the new directory
        if self.current_rows.is_some() {
            self.load_selected();
        }
    }

    fn on_open_search(&mut self) {
        self.show_search = true;
        self.focus_search = true;
    }

    /// Drain the session's event queue and dispatch to the handlers above.
    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                UiEvent::ExportCsv => self.on_export_csv(),
                UiEvent::AssetsDirChanged(dir) => self.on_assets_dir_changed(dir),
                UiEvent::OpenSearch => self.on_open_search(),
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().and_then(|f| f.path.clone()));
        if let Some(path) = dropped {
            let known = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| DB_EXTENSIONS.contains(&e))
                .unwrap_or(false);
            if known {
                self.open_database(path);
            } else {
                self.error = Some("Please drop a SQLite database file".into());
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let mut open_assets = false;
        let mut export_csv = false;
        let mut open_search = false;

        ctx.input(|i| {
            if i.modifiers.ctrl || i.modifiers.mac_cmd {
                if i.modifiers.shift && i.key_pressed(egui::Key::O) {
                    open_assets = true;
                }
                if i.key_pressed(egui::Key::E) {
                    export_csv = true;
                }
                if i.key_pressed(egui::Key::F) {
                    open_search = true;
                }
            }
        });

        if open_assets {
            self.pick_assets_dir();
        }
        if export_csv {
            self.session.emit(UiEvent::ExportCsv);
        }
        if open_search {
            self.session.emit(UiEvent::OpenSearch);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar")
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(12.0, 6.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("SQLite Explorer")
                            .size(16.0)
                            .color(Theme::TEXT_PRIMARY)
                            .strong(),
                    );
                    ui.add_space(16.0);

                    let recent_files = self.recent_files.clone();
                    ui.menu_button(RichText::new("File").color(Theme::TEXT_PRIMARY), |ui| {
                        if ui.button("Open Database...").clicked() {
                            self.pick_database();
                            ui.close_menu();
                        }
                        if !recent_files.is_empty() {
                            ui.menu_button("Open Recent", |ui| {
                                for path in &recent_files {
                                    let name = path
                                        .file_name()
                                        .map(|n| n.to_string_lossy().to_string())
                                        .unwrap_or_else(|| path.display().to_string());
                                    if ui.button(name).clicked() {
                                        self.open_database(path.clone());
                                        ui.close_menu();
                                    }
                                }
                            });
                        }
                        ui.separator();
                        if ui.button("Add Assets Folder... (Ctrl+Shift+O)").clicked() {
                            self.pick_assets_dir();
                            ui.close_menu();
                        }
                        ui.separator();
                        let can_export = self.current_rows.is_some();
                        if ui
                            .add_enabled(can_export, egui::Button::new("Export CSV (Ctrl+E)"))
                            .clicked()
                        {
                            self.session.emit(UiEvent::ExportCsv);
                            ui.close_menu();
                        }
                        ui.separator();
                        if ui.button("Quit").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });

                    ui.menu_button(RichText::new("Help").color(Theme::TEXT_PRIMARY), |ui| {
                        if ui.button("About").clicked() {
                            self.show_about = true;
                            ui.close_menu();
                        }
                    });
                });
            });
    }

    fn about_window(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }
        let mut open = self.show_about;
        egui::Window::new("About")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("SQLite Explorer")
                        .size(18.0)
                        .color(Theme::TEXT_PRIMARY)
                        .strong(),
                );
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Read-only SQLite database viewer with foreign-key navigation")
                        .color(Theme::TEXT_SECONDARY),
                );
            });
        self.show_about = open;
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            Theme::apply(ctx);
            self.theme_applied = true;
        }

        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);
        self.dispatch_events();

        self.menu_bar(ctx);
        self.about_window(ctx);

        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(Theme::BG_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(12.0, 6.0)),
            )
            .show(ctx, |ui| panels::status_bar(ui, self));

        if self.phase() != Phase::NoDatabase {
            egui::SidePanel::left("table_list")
                .resizable(true)
                .default_width(220.0)
                .show(ctx, |ui| panels::table_list_panel(ui, self));
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.phase() {
            Phase::NoDatabase => panels::welcome_panel(ui, self),
            Phase::DatabaseOpen => panels::no_table_panel(ui, self),
            Phase::TableLoaded => panels::table_view_panel(ui, self),
        });
    }
}
