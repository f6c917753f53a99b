// src/gui/components/estimator.rs

use eframe::egui::{self, widgets::Spinner};

use crate::{
    config::consts::*,
    quote::QuoteResponse,
    widget::{ResultView, ShippingEstimatorWidget},
};

const ERROR_RED: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);
const BADGE_GREEN: egui::Color32 = egui::Color32::from_rgb(20, 140, 60);

pub fn draw(ui: &mut egui::Ui, w: &mut ShippingEstimatorWidget) {
    ui.heading(LABEL_TITLE);
    ui.label(LABEL_SUBTITLE);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label(LABEL_CEP_FIELD);

        let field = ui.add(
            egui::TextEdit::singleline(&mut w.cep_input)
                .hint_text(LABEL_CEP_HINT)
                .char_limit(CEP_FIELD_MAX_LEN)
                .desired_width(90.0),
        );
        if field.changed() {
            w.on_cep_input();
        }
        if field.has_focus()
            && ui.input(|i| i.events.iter().any(|e| matches!(e, egui::Event::Paste(_))))
        {
            w.on_paste();
        }
        if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            w.calculate();
        }

        if ui.button(LABEL_CALCULATE).clicked() {
            w.calculate();
        }
    });

    if w.is_loading() {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.add(Spinner::new());
            ui.label(LABEL_LOADING);
        });
    }

    match w.view() {
        ResultView::Hidden => {}
        ResultView::Error(msg) => {
            ui.add_space(6.0);
            ui.colored_label(ERROR_RED, msg);
        }
        ResultView::Results(resp) => draw_results(ui, resp),
    }
}

fn draw_results(ui: &mut egui::Ui, resp: &QuoteResponse) {
    ui.add_space(6.0);

    for (i, opt) in resp.shipping_options.iter().enumerate() {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                if let Some(url) = opt.logo_url() {
                    ui.add(egui::Image::new(url).max_height(20.0));
                }
                ui.strong(&opt.company);
                if i == 0 {
                    // first option is always badged cheapest
                    ui.label(egui::RichText::new(LABEL_CHEAPEST).small().color(BADGE_GREEN));
                }
            });
            ui.label(&opt.service_name);
            ui.horizontal(|ui| {
                ui.strong(&opt.formatted_price);
                ui.label(&opt.formatted_delivery_estimate);
            });
        });
    }

    if let Some((cheapest, fastest)) = resp.summary_pair() {
        ui.add_space(4.0);
        ui.label(format!(
            "{}: {} em {}",
            LABEL_CHEAPEST, cheapest.formatted_price, cheapest.formatted_delivery_estimate
        ));
        ui.label(format!(
            "{}: {} em {}",
            LABEL_FASTEST, fastest.formatted_price, fastest.formatted_delivery_estimate
        ));
    }
}
