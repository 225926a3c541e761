//! The page for recording a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{Category, TransactionKind},
};

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
///
/// The date field defaults to today in the configured timezone.
pub async fn get_new_transaction_page(State(state): State<NewTransactionPageState>) -> Response {
    let local_timezone = match get_local_offset(&state.local_timezone) {
        Some(offset) => offset,
        None => return Error::InvalidTimezone(state.local_timezone).into_response(),
    };

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold leading-tight tracking-tight md:text-2xl my-4"
            {
                "New Transaction"
            }

            form
                class="w-full space-y-4"
                hx-post=(endpoints::TRANSACTIONS_VIEW)
                hx-target-error="#alert-container"
            {
                fieldset class="flex gap-4"
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    @for kind in [TransactionKind::Income, TransactionKind::Expense] {
                        label class="flex items-center gap-2 text-sm font-medium"
                        {
                            input
                                type="radio"
                                name="type"
                                value=(kind.as_str())
                                checked[kind == TransactionKind::Income]
                                required;

                            (kind.label())
                        }
                    }
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="category"
                        id="category"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required
                    {
                        @for category in Category::ALL {
                            option value=(category.as_str()) { (category.label()) }
                        }
                    }
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        type="number"
                        name="amount"
                        id="amount"
                        class=(FORM_TEXT_INPUT_STYLE)
                        min="0.01"
                        step="0.01"
                        placeholder="0.00"
                        required;
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        type="text"
                        name="description"
                        id="description"
                        class=(FORM_TEXT_INPUT_STYLE)
                        placeholder="What was this for?"
                        required;
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        type="date"
                        name="date"
                        id="date"
                        class=(FORM_TEXT_INPUT_STYLE)
                        value=(today)
                        required;
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add transaction" }
            }
        }
    );

    base("New Transaction", &[], &content).into_response()
}

#[cfg(test)]
mod view_tests {
    use axum::{body::Body, extract::State, http::StatusCode, response::Response};
    use scraper::{ElementRef, Html};

    use crate::endpoints;

    use super::{NewTransactionPageState, get_new_transaction_page};

    #[tokio::test]
    async fn new_transaction_returns_form() {
        let state = NewTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_new_transaction_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;
        assert_valid_html(&document);
        assert_correct_form(&document);
    }

    #[tokio::test]
    async fn invalid_timezone_gives_error_page() {
        let state = NewTransactionPageState {
            local_timezone: "Atlantis/Underwater".to_owned(),
        };

        let response = get_new_transaction_page(State(state)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_correct_form(document: &Html) {
        let form_selector = scraper::Selector::parse("form").unwrap();
        let forms = document.select(&form_selector).collect::<Vec<_>>();
        assert_eq!(forms.len(), 1, "want 1 form, got {}", forms.len());

        let form = forms.first().unwrap();
        let hx_post = form.value().attr("hx-post");
        assert_eq!(
            hx_post,
            Some(endpoints::TRANSACTIONS_VIEW),
            "want form with attribute hx-post=\"{}\", got {hx_post:?}",
            endpoints::TRANSACTIONS_VIEW,
        );

        assert_correct_inputs(form);
        assert_category_options(form);
        assert_kind_radios(form);
        assert_has_submit_button(form);
    }

    #[track_caller]
    fn assert_correct_inputs(form: &ElementRef) {
        let expected_input_types = vec![
            ("amount", "number"),
            ("date", "date"),
            ("description", "text"),
        ];

        for (name, element_type) in expected_input_types {
            let selector_string = format!("input[type={element_type}]");
            let input_selector = scraper::Selector::parse(&selector_string).unwrap();
            let inputs = form.select(&input_selector).collect::<Vec<_>>();
            assert_eq!(
                inputs.len(),
                1,
                "want 1 {element_type} input, got {}",
                inputs.len()
            );

            let input = inputs.first().unwrap();

            let input_name = input.value().attr("name");
            assert_eq!(
                input_name,
                Some(name),
                "want {element_type} with name=\"{name}\", got {input_name:?}"
            );

            let required = input.value().attr("required");
            assert!(
                required.is_some(),
                "want {name} input to be required, got {required:?}"
            );

            if input_name == Some("amount") {
                assert_amount_min_and_step(input);
            }
        }
    }

    #[track_caller]
    fn assert_amount_min_and_step(input: &ElementRef) {
        let min_value = input
            .value()
            .attr("min")
            .expect("amount input should have the attribute 'min'");
        let min_value: f64 = min_value
            .parse()
            .expect("the attribute 'min' for the amount input should be a number");
        assert_eq!(
            0.01, min_value,
            "the amount for a new transaction should be limited to a minimum of 0.01, but got {min_value}"
        );

        let step = input
            .value()
            .attr("step")
            .expect("amount input should have the attribute 'step'");
        let step: f64 = step
            .parse()
            .expect("the attribute 'step' for the amount input should be a float");
        assert_eq!(
            0.01, step,
            "the amount for a new transaction should increment in steps of 0.01, but got {step}"
        );
    }

    #[track_caller]
    fn assert_category_options(form: &ElementRef) {
        let option_selector = scraper::Selector::parse("select[name=category] option").unwrap();
        let options = form.select(&option_selector).collect::<Vec<_>>();
        assert_eq!(options.len(), 7, "want 7 category options, got {}", options.len());
    }

    #[track_caller]
    fn assert_kind_radios(form: &ElementRef) {
        let radio_selector = scraper::Selector::parse("input[type=radio][name=type]").unwrap();
        let radios = form.select(&radio_selector).collect::<Vec<_>>();
        assert_eq!(radios.len(), 2, "want 2 type radios, got {}", radios.len());

        let values: Vec<_> = radios
            .iter()
            .filter_map(|radio| radio.value().attr("value"))
            .collect();
        assert_eq!(values, vec!["income", "expense"]);
    }

    #[track_caller]
    fn assert_has_submit_button(form: &ElementRef) {
        let button_selector = scraper::Selector::parse("button").unwrap();
        let buttons = form.select(&button_selector).collect::<Vec<_>>();
        assert_eq!(buttons.len(), 1, "want 1 button, got {}", buttons.len());
        let button_type = buttons.first().unwrap().value().attr("type");
        assert_eq!(
            button_type,
            Some("submit"),
            "want button with type=\"submit\", got {button_type:?}"
        );
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
