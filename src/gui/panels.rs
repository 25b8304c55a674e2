//! UI panels for the SQLite Explorer

use eframe::egui::{self, RichText, Rounding, Stroke};
use sqlite_explorer::browse::{classify_cell, CellAction};
use sqlite_explorer::CellValue;

use crate::app::ExplorerApp;
use crate::theme::Theme;

/// Welcome panel shown when no database is open
pub fn welcome_panel(ui: &mut egui::Ui, app: &mut ExplorerApp) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);

        ui.label(RichText::new("◫").size(64.0).color(Theme::ACCENT));
        ui.add_space(12.0);
        ui.label(
            RichText::new("SQLite Explorer")
                .size(32.0)
                .color(Theme::TEXT_PRIMARY)
                .strong(),
        );
        ui.add_space(6.0);
        ui.label(
            RichText::new("Browse tables, follow foreign keys, export CSV")
                .size(14.0)
                .color(Theme::TEXT_SECONDARY),
        );

        ui.add_space(32.0);

        if ui
            .button(RichText::new("Open Database...").size(14.0))
            .clicked()
        {
            app.pick_database();
        }

        ui.add_space(24.0);

        egui::Frame::none()
            .fill(Theme::BG_MEDIUM)
            .rounding(Rounding::same(10.0))
            .stroke(Stroke::new(1.5, Theme::BORDER))
            .inner_margin(egui::Margin::symmetric(40.0, 24.0))
            .show(ui, |ui| {
                ui.label(
                    RichText::new("or drop a .db / .sqlite / .sqlite3 file here")
                        .size(13.0)
                        .color(Theme::TEXT_MUTED),
                );
            });
    });
}

/// Hint shown after opening a database, before any table is loaded
pub fn no_table_panel(ui: &mut egui::Ui, app: &mut ExplorerApp) {
    ui.vertical_centered(|ui| {
        ui.add_space(100.0);
        ui.label(
            RichText::new(format!("{} tables found", app.tables.len()))
                .size(18.0)
                .color(Theme::TEXT_PRIMARY),
        );
        ui.add_space(6.0);
        ui.label(
            RichText::new("Select a table on the left to browse its rows.")
                .size(13.0)
                .color(Theme::TEXT_SECONDARY),
        );
    });
}

/// Left panel listing the open database's tables
pub fn table_list_panel(ui: &mut egui::Ui, app: &mut ExplorerApp) {
    egui::Frame::none()
        .fill(Theme::BG_DARK)
        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
        .show(ui, |ui| {
            ui.label(
                RichText::new(format!("TABLES ({})", app.tables.len()))
                    .color(Theme::TEXT_MUTED)
                    .size(11.0),
            );
        });

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 0.0;
            for table in &app.tables.clone() {
                let selected = app.selected_table.as_ref() == Some(table);
                if table_item(ui, table, selected) {
                    app.select_table(table);
                }
            }
        });
}

fn table_item(ui: &mut egui::Ui, name: &str, selected: bool) -> bool {
    let bg = if selected {
        Theme::ACCENT_MUTED
    } else {
        Theme::BG_DARK
    };
    let text_color = if selected {
        Theme::ACCENT
    } else {
        Theme::TEXT_PRIMARY
    };

    let response = egui::Frame::none()
        .fill(bg)
        .inner_margin(egui::Margin::symmetric(14.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(name).color(text_color).size(13.0));
                ui.allocate_space(egui::vec2(ui.available_width(), 0.0));
            });
        })
        .response;

    response.interact(egui::Sense::click()).clicked()
}

/// Search bar: Enter submits, Escape clears and hides
fn search_bar(ui: &mut egui::Ui, app: &mut ExplorerApp) {
    egui::Frame::none()
        .fill(Theme::BG_MEDIUM)
        .rounding(Rounding::same(6.0))
        .inner_margin(egui::Margin::symmetric(10.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("⌕").color(Theme::TEXT_MUTED).size(14.0));

                let field = egui::TextEdit::singleline(&mut app.search_query)
                    .hint_text("Search in this table...")
                    .desired_width(240.0)
                    .frame(false);
                let response = ui.add(field);

                if app.focus_search {
                    response.request_focus();
                    app.focus_search = false;
                }

                let enter = response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));

                if ui.small_button("Search").clicked() || enter {
                    app.run_search();
                }
                if ui.small_button("×").clicked() {
                    app.close_search();
                    app.status = "Search closed.".into();
                } else if escape {
                    app.close_search();
                }
            });
        });
}

/// Central grid view for the loaded row set
pub fn table_view_panel(ui: &mut egui::Ui, app: &mut ExplorerApp) {
    let Some(rs) = app.current_rows.clone() else {
        return;
    };
    let assets_set = app.session.assets_dir().is_some();
    let column_fks: Vec<_> = rs.columns.iter().map(|c| rs.foreign_key(c).cloned()).collect();

    // Header: table name, badges, actions
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(&rs.table)
                .size(18.0)
                .color(Theme::TEXT_PRIMARY)
                .strong(),
        );
        badge(ui, &format!("{} rows", rs.row_count()));
        badge(ui, &format!("{} columns", rs.column_count()));

        if ui.small_button("⟳ Reload").clicked() {
            app.load_selected();
        }
        if ui.small_button("⌕ Search").clicked() {
            app.show_search = true;
            app.focus_search = true;
        }
    });

    if app.show_search {
        ui.add_space(6.0);
        search_bar(ui, app);
    }

    ui.add_space(8.0);

    // Deferred cell interactions, applied after the grid is drawn
    let mut clicked_nav: Option<(String, String, CellValue)> = None;
    let mut clicked_asset: Option<String> = None;

    egui::Frame::none()
        .fill(Theme::BG_MEDIUM)
        .rounding(Rounding::same(6.0))
        .inner_margin(egui::Margin::same(1.0))
        .show(ui, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                egui_extras::TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .columns(
                        egui_extras::Column::auto().at_least(90.0).resizable(true),
                        rs.column_count().max(1),
                    )
                    .header(28.0, |mut header| {
                        for (idx, col) in rs.columns.iter().enumerate() {
                            header.col(|ui| {
                                ui.label(
                                    RichText::new(col)
                                        .color(Theme::TEXT_PRIMARY)
                                        .size(12.0)
                                        .strong(),
                                );
                                if let Some(fk) = &column_fks[idx] {
                                    ui.label(RichText::new("FK").color(Theme::ACCENT).size(9.0))
                                        .on_hover_text(format!(
                                            "references {}.{}",
                                            fk.target_table, fk.target_column
                                        ));
                                }
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(24.0, rs.row_count(), |mut row| {
                            let row_idx = row.index();
                            let data_row = &rs.rows[row_idx];
                            for (col_idx, value) in data_row.values.iter().enumerate() {
                                row.col(|ui| {
                                    let action =
                                        classify_cell(value, column_fks[col_idx].as_ref());
                                    render_cell(
                                        ui,
                                        value,
                                        action,
                                        assets_set,
                                        &mut clicked_nav,
                                        &mut clicked_asset,
                                    );
                                });
                            }
                        });
                    });
            });
        });

    if let Some((table, column, value)) = clicked_nav {
        app.navigate(table, column, value);
    }
    if let Some(file_name) = clicked_asset {
        app.open_asset(&file_name);
    }
}

fn render_cell(
    ui: &mut egui::Ui,
    value: &CellValue,
    action: CellAction,
    assets_set: bool,
    clicked_nav: &mut Option<(String, String, CellValue)>,
    clicked_asset: &mut Option<String>,
) {
    let text = truncate(&value.display(), 50);

    match action {
        CellAction::Navigate {
            table,
            column,
            value,
        } => {
            let link = ui.add(
                egui::Label::new(
                    RichText::new(&text)
                        .color(Theme::ACCENT)
                        .size(12.0)
                        .underline(),
                )
                .sense(egui::Sense::click()),
            );
            if link
                .on_hover_text(format!("go to {table}.{column} = {}", value.display()))
                .clicked()
            {
                *clicked_nav = Some((table, column, value));
            }
        }
        CellAction::OpenAsset { file_name } => {
            ui.label(RichText::new(&text).color(Theme::TEXT_SECONDARY).size(12.0));
            if assets_set {
                let open = ui.add(
                    egui::Label::new(RichText::new("open").color(Theme::ACCENT).size(11.0))
                        .sense(egui::Sense::click()),
                );
                if open.clicked() {
                    *clicked_asset = Some(file_name);
                }
            } else {
                ui.label(RichText::new("open").color(Theme::TEXT_MUTED).size(11.0))
                    .on_hover_text("Set the assets folder from the File menu");
            }
        }
        CellAction::Plain => {
            ui.label(RichText::new(&text).color(Theme::TEXT_SECONDARY).size(12.0));
        }
    }
}

/// Bottom status bar: status text, error, assets directory
pub fn status_bar(ui: &mut egui::Ui, app: &mut ExplorerApp) {
    ui.horizontal(|ui| {
        if let Some(err) = &app.error {
            ui.label(RichText::new(err).color(Theme::ERROR).size(12.0));
        } else {
            ui.label(
                RichText::new(&app.status)
                    .color(Theme::TEXT_SECONDARY)
                    .size(12.0),
            );
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(dir) = app.session.assets_dir() {
                ui.label(
                    RichText::new(format!("assets: {}", dir.display()))
                        .color(Theme::TEXT_MUTED)
                        .size(11.0),
                );
            }
        });
    });
}

fn badge(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(Theme::BG_LIGHT)
        .rounding(Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(Theme::TEXT_SECONDARY).size(12.0));
        });
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}
