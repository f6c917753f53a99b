// src/widget.rs
// The shipping estimator itself: mount, input mask, triggers, the
// calculate cycle and response application. Headless — the egui front in
// gui/ only reads this state and forwards events, so the whole observable
// contract is testable without a window.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error};

use crate::cep::{digits_only, format_cep, is_valid_cep};
use crate::config::consts::*;
use crate::config::options::{ProductData, WidgetConfig};
use crate::core::html::find_by_id;
use crate::quote::{QuoteClient, QuoteError, QuoteRequest, QuoteResponse};
use crate::scrape::scrape_product_data;

/// Which outcome region is visible. At most one of results/error is
/// active after a completed calculate; the loading flag is tracked
/// separately and may overlap briefly while a second request is in flight.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultView {
    Hidden,
    Results(QuoteResponse),
    Error(String),
}

type Outcome = Result<QuoteResponse, QuoteError>;

pub struct ShippingEstimatorWidget {
    config: WidgetConfig,
    // None when the widget is inert (mount or client setup failed)
    client: Option<QuoteClient>,
    page: String,
    product_override: Option<ProductData>,

    /// CEP field contents, display form (`NNNNN-NNN`).
    pub cep_input: String,

    is_loading: bool,
    last_response: Option<QuoteResponse>,
    view: ResultView,

    // In-flight requests, oldest first. Completions apply in arrival
    // order; a later arrival overwrites an earlier one (no fencing).
    pending: Vec<Receiver<Outcome>>,
    paste_deadline: Option<Instant>,
}

impl ShippingEstimatorWidget {
    /// Factory entry point. `page` is the host product page the widget is
    /// embedded in; the mount region is located there by its configured
    /// id. A missing region (or a client that cannot be built) is logged
    /// and leaves the widget permanently inert — nothing escapes.
    pub fn init(config: WidgetConfig, page: &str) -> Self {
        let client = if find_by_id(page, &config.mount_point_id).is_some() {
            match QuoteClient::new(&config.api_base_url) {
                Ok(c) => Some(c),
                Err(e) => {
                    error!("quote client setup failed: {e}");
                    None
                }
            }
        } else {
            error!("mount region #{} not found", config.mount_point_id);
            None
        };

        let product_override = config.product_data_override.clone();

        Self {
            config,
            client,
            page: s!(page),
            product_override,
            cep_input: s!(),
            is_loading: false,
            last_response: None,
            view: ResultView::Hidden,
            pending: Vec::new(),
            paste_deadline: None,
        }
    }

    /* ---------- input events ---------- */

    /// Apply the display mask after any field change. Pure reformat plus
    /// the field's 9-char cap; characters are never rejected up front.
    pub fn on_cep_input(&mut self) {
        let mut v = format_cep(&self.cep_input);
        v.truncate(CEP_FIELD_MAX_LEN);
        self.cep_input = v;
    }

    /// Paste into the CEP field: arm the auto-trigger. Validity is
    /// checked when the timer fires, not at paste time.
    pub fn on_paste(&mut self) {
        if self.mounted() {
            self.paste_deadline =
                Some(Instant::now() + Duration::from_millis(PASTE_TRIGGER_DELAY_MS));
        }
    }

    /// Frame pump: fire a due paste trigger and apply finished requests
    /// in arrival order.
    pub fn tick(&mut self) {
        if let Some(t) = self.paste_deadline {
            if Instant::now() >= t {
                self.paste_deadline = None;
                if is_valid_cep(&self.cep_input) {
                    self.calculate();
                }
            }
        }

        let mut i = 0;
        while i < self.pending.len() {
            match self.pending[i].try_recv() {
                Ok(outcome) => {
                    self.pending.remove(i);
                    self.apply_outcome(outcome);
                }
                Err(TryRecvError::Empty) => i += 1,
                Err(TryRecvError::Disconnected) => {
                    // Worker died without reporting
                    self.pending.remove(i);
                    error!("quote worker disappeared");
                    self.view = ResultView::Error(s!(MSG_CONNECTION_ERROR));
                    self.is_loading = false;
                }
            }
        }
    }

    /* ---------- operations ---------- */

    /// The core request/response cycle. Validates first (no request, no
    /// loading state on failure), then issues one request on a worker
    /// thread; the outcome lands via `tick`.
    pub fn calculate(&mut self) {
        let Some(client) = self.client.clone() else {
            return; // inert
        };

        let to_cep = digits_only(&self.cep_input);
        if to_cep.len() != 8 {
            self.view = ResultView::Error(s!(MSG_INVALID_CEP));
            return;
        }

        self.is_loading = true;
        self.view = ResultView::Hidden;

        let product = self
            .product_override
            .clone()
            .unwrap_or_else(|| scrape_product_data(&self.page));
        let from_cep = self.config.origin_postal_code.clone();
        debug!("quote: {from_cep} -> {to_cep} (product {})", product.id);

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let req = QuoteRequest {
                from_postal_code: &from_cep,
                to_postal_code: &to_cep,
                shopify_product: &product,
            };
            let _ = tx.send(client.calculate(&req));
        });
        self.pending.push(rx);
    }

    /// Public recompute entry point: store a replacement product if given,
    /// then re-run calculate — but only when the field already holds a
    /// valid CEP. Otherwise a no-op.
    pub fn recalculate(&mut self, new_product: Option<ProductData>) {
        if !self.mounted() {
            return;
        }
        if let Some(p) = new_product {
            self.product_override = Some(p);
        }
        if !self.cep_input.is_empty() && is_valid_cep(&self.cep_input) {
            self.calculate();
        }
    }

    fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Ok(resp) if resp.success => {
                if resp.shipping_options.is_empty() {
                    self.view = ResultView::Error(s!(MSG_NO_OPTIONS));
                } else {
                    self.view = ResultView::Results(resp.clone());
                }
                // Overwritten on every successful response, kept on error
                self.last_response = Some(resp);
            }
            Ok(resp) => {
                let msg = resp
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| s!(MSG_CALC_ERROR));
                self.view = ResultView::Error(msg);
            }
            Err(e) => {
                error!("quote request failed: {e}");
                self.view = ResultView::Error(s!(MSG_CONNECTION_ERROR));
            }
        }
        self.is_loading = false;
    }

    /* ---------- state accessors ---------- */

    pub fn mounted(&self) -> bool {
        self.client.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// True while anything is outstanding (requests or the paste timer) —
    /// the GUI keeps repainting while this holds.
    pub fn busy(&self) -> bool {
        self.is_loading || !self.pending.is_empty() || self.paste_deadline.is_some()
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn last_response(&self) -> Option<&QuoteResponse> {
        self.last_response.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <div class="product">
          <span class="product-price">R$ 49,90</span>
          <div data-weight="600"></div>
        </div>
        <div id="calculador-frete"></div>
    "#;

    fn widget() -> ShippingEstimatorWidget {
        ShippingEstimatorWidget::init(WidgetConfig::default(), PAGE)
    }

    #[test]
    fn missing_mount_region_makes_widget_inert() {
        let w = ShippingEstimatorWidget::init(WidgetConfig::default(), "<div id='other'></div>");
        assert!(!w.mounted());

        let mut w = w;
        w.cep_input = s!("01310-930");
        w.calculate();
        w.recalculate(Some(ProductData::default()));
        assert!(!w.is_loading());
        assert_eq!(*w.view(), ResultView::Hidden);
    }

    #[test]
    fn invalid_cep_shows_error_without_loading() {
        let mut w = widget();
        w.cep_input = s!("0131");
        w.calculate();
        assert!(!w.is_loading());
        assert!(!w.busy());
        assert_eq!(*w.view(), ResultView::Error(s!(MSG_INVALID_CEP)));
    }

    #[test]
    fn input_mask_applies_and_caps_length() {
        let mut w = widget();
        w.cep_input = s!("013109301234");
        w.on_cep_input();
        assert_eq!(w.cep_input, "01310-930");

        w.cep_input = s!("1a2b3");
        w.on_cep_input();
        assert_eq!(w.cep_input, "123");
    }

    #[test]
    fn recalculate_is_noop_without_valid_cep() {
        let mut w = widget();
        w.recalculate(None);
        assert!(!w.busy());

        w.cep_input = s!("123");
        w.recalculate(Some(ProductData::default()));
        assert!(!w.busy());
        // the override is still stored for the next run
        assert_eq!(*w.view(), ResultView::Hidden);
    }

    #[test]
    fn paste_trigger_checks_validity_when_it_fires() {
        let mut w = widget();
        w.cep_input = s!("0131");
        w.on_paste();
        std::thread::sleep(Duration::from_millis(PASTE_TRIGGER_DELAY_MS + 30));
        w.tick();
        // invalid at fire time: nothing happens, not even the error
        assert!(!w.busy());
        assert_eq!(*w.view(), ResultView::Hidden);
    }

    #[test]
    fn paste_trigger_is_deferred() {
        let mut w = widget();
        w.cep_input = s!("01310-930");
        w.on_paste();
        w.tick();
        assert!(!w.is_loading(), "must not fire before the delay");
        std::thread::sleep(Duration::from_millis(PASTE_TRIGGER_DELAY_MS + 30));
        w.tick();
        assert!(w.is_loading(), "fires after the delay with a valid CEP");
    }

    #[test]
    fn server_error_falls_back_when_message_empty() {
        let mut w = widget();
        w.apply_outcome(Ok(QuoteResponse {
            success: false,
            error: Some(s!()),
            shipping_options: vec![],
            cheapest: None,
            fastest: None,
        }));
        assert_eq!(*w.view(), ResultView::Error(s!(MSG_CALC_ERROR)));
        assert!(w.last_response().is_none());
    }

    #[test]
    fn empty_option_list_is_an_error_but_still_stored() {
        let mut w = widget();
        let resp = QuoteResponse {
            success: true,
            error: None,
            shipping_options: vec![],
            cheapest: None,
            fastest: None,
        };
        w.apply_outcome(Ok(resp.clone()));
        assert_eq!(*w.view(), ResultView::Error(s!(MSG_NO_OPTIONS)));
        assert_eq!(w.last_response(), Some(&resp));
    }
}
