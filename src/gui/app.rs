// src/gui/app.rs
use std::error::Error;
use std::time::Duration;

use eframe::egui;

use crate::{
    config::options::WidgetConfig,
    scrape::scrape_product_data,
    widget::ShippingEstimatorWidget,
};

use super::components;

/// Demo host page bundled with the binary. Stands in for the Shopify
/// product page the widget is normally embedded in: mount region, price
/// markup and data-* attributes all live there.
const DEMO_PAGE: &str = include_str!("../../assets/product_page.html");

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Calculador de Frete",
        options,
        Box::new(|cc| {
            // Carrier logos arrive by URL
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(App::new(WidgetConfig::default())))
        }),
    )?;
    Ok(())
}

pub struct App {
    widget: ShippingEstimatorWidget,
    // product card shown above the widget, read from the same page
    product_price: String,
    product_weight: String,
}

impl App {
    pub fn new(config: WidgetConfig) -> Self {
        let widget = ShippingEstimatorWidget::init(config, DEMO_PAGE);
        let product = scrape_product_data(DEMO_PAGE);

        Self {
            widget,
            product_price: format!("R$ {:.2}", product.price).replace('.', ","),
            product_weight: format!("{:.3} kg", product.weight_kg),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.widget.tick();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Página de produto (demo)");
            ui.horizontal(|ui| {
                ui.label("Preço:");
                ui.strong(&self.product_price);
                ui.label("· Peso:");
                ui.label(&self.product_weight);
            });

            ui.separator();

            components::estimator::draw(ui, &mut self.widget);
        });

        // Poll for request completions and the paste timer
        if self.widget.busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
