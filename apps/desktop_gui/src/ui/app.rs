use std::time::Duration;

use client_core::{render_page, Cell, GridShape, RenderedPage};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{
    apply_event, request_reload, search_changed, step_page, submit_form, DirectoryModel,
};

const CARD_SIZE: egui::Vec2 = egui::vec2(180.0, 76.0);

pub struct DirectoryApp {
    model: DirectoryModel,
    grid: GridShape,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl DirectoryApp {
    pub fn new(grid: GridShape, cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            model: DirectoryModel::new(grid),
            grid,
            cmd_tx,
            ui_rx,
        };
        app.reload();
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.model.status);
    }

    fn reload(&mut self) {
        let cmd = request_reload(&mut self.model);
        self.dispatch(cmd);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(cmd) = apply_event(&mut self.model, event) {
                self.dispatch(cmd);
            }
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Contacts");
            ui.separator();
            let search = ui.add(
                egui::TextEdit::singleline(&mut self.model.search_text)
                    .hint_text("Search name or phone")
                    .desired_width(240.0),
            );
            if search.changed() {
                search_changed(&mut self.model);
            }
            if ui.button("Refresh").clicked() {
                self.reload();
            }
            if self.model.loading {
                ui.spinner();
            }
        });
    }

    fn show_pager(&mut self, ui: &mut egui::Ui, page: &RenderedPage) {
        ui.horizontal(|ui| {
            let has_prev = page.current_page > 0;
            let has_next = page.current_page + 1 < page.total_pages;
            if ui.add_enabled(has_prev, egui::Button::new("◀ Previous")).clicked() {
                step_page(&mut self.model, -1);
            }
            ui.label(page.page_label());
            if ui.add_enabled(has_next, egui::Button::new("Next ▶")).clicked() {
                step_page(&mut self.model, 1);
            }
        });
    }

    fn show_grid(&self, ui: &mut egui::Ui, page: &RenderedPage) {
        egui::Grid::new("contact_grid")
            .num_columns(self.grid.cols())
            .spacing([8.0, 8.0])
            .show(ui, |ui| {
                for (index, cell) in page.cells.iter().enumerate() {
                    match cell {
                        Cell::Card {
                            first_name,
                            last_name,
                            phone,
                        } => {
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.set_min_size(CARD_SIZE);
                                ui.set_max_width(CARD_SIZE.x);
                                ui.vertical(|ui| {
                                    ui.strong(format!("{first_name} {last_name}"));
                                    ui.label(egui::RichText::new("Contact").weak().small());
                                    ui.monospace(phone.as_str());
                                });
                            });
                        }
                        Cell::Placeholder => {
                            ui.allocate_space(CARD_SIZE + egui::vec2(12.0, 12.0));
                        }
                    }
                    if (index + 1) % self.grid.cols() == 0 {
                        ui.end_row();
                    }
                }
            });
    }

    fn show_add_form(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Add contact:");
            ui.add(
                egui::TextEdit::singleline(&mut self.model.form.first_name)
                    .hint_text("First name")
                    .desired_width(140.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.model.form.last_name)
                    .hint_text("Last name")
                    .desired_width(140.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.model.form.phone)
                    .hint_text("Phone")
                    .desired_width(120.0),
            );
            if ui
                .add_enabled(!self.model.adding, egui::Button::new("Add"))
                .clicked()
            {
                if let Some(cmd) = submit_form(&mut self.model) {
                    self.dispatch(cmd);
                }
            }
        });
    }
}

impl eframe::App for DirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.model.state.clamp_page();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_toolbar(ui);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.add_space(2.0);
            ui.label(egui::RichText::new(&self.model.status).weak());
            ui.add_space(2.0);
        });

        egui::TopBottomPanel::bottom("add_form").show(ctx, |ui| {
            ui.add_space(4.0);
            self.show_add_form(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let page = render_page(&self.model.state);
            if page.show_empty {
                ui.label(egui::RichText::new("No contacts to show.").italics());
                ui.add_space(8.0);
            }
            self.show_grid(ui, &page);
            ui.add_space(8.0);
            self.show_pager(ui, &page);
        });

        if self.model.loading || self.model.adding {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
