//! Line-command driver for exercising the flow from a terminal.

use serde_json::{Value, json};
use tracing::warn;

use crate::error::{CommandError, Result};
use crate::geo::Coordinate;
use crate::location::AddressField;
use crate::navigation::{Route, UserType};
use crate::screens::{ScreenFlow, SignInOutcome};

pub const HELP: &str = "\
commands:
  screen                      show the active frame
  stack                       show the whole route stack
  back                        go back one screen
  open <Route> [json]         push a route by name
  go <action> [arg]           screen action (get-started, sign-in, sign-up,
                              proceed-new, proceed-returning, forgot-password,
                              vendor, customer, submit, switch-sign-in,
                              verify <code>, continue, save-details,
                              save-location, category <name>, reviews)
  start                       resolve the device location
  tap <lat> <lng>             move the delivery pin
  pan <lat> <lng>             move the map, keeping its zoom
  recenter                    return the pin and map to the device location
  set <field> <value>         edit flatNo, street, area or landmark
  commit                      snapshot the location without leaving
  feed                        load the home product feed
  quit";

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Screen,
    Stack,
    Back,
    Open { route: Route },
    Go { action: Action },
    Start,
    Tap { at: Coordinate },
    Pan { to: Coordinate },
    Recenter,
    Set { field: AddressField, value: String },
    Commit,
    Feed,
    Help,
    Quit,
}

/// Screen actions reachable through `go`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    GetStarted,
    SignIn,
    SignUp,
    Proceed(SignInOutcome),
    ForgotPassword,
    SelectTab(UserType),
    Submit,
    SwitchToSignIn,
    Verify(String),
    Continue,
    SaveDetails,
    SaveLocation,
    Category(String),
    Reviews,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match head {
            "screen" => Self::Screen,
            "stack" => Self::Stack,
            "back" => Self::Back,
            "open" => {
                let (name, params) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if name.is_empty() {
                    return Err(CommandError::Usage("open <Route> [json]").into());
                }
                let params = if params.trim().is_empty() {
                    Value::Null
                } else {
                    serde_json::from_str(params).map_err(|e| CommandError::InvalidArgument {
                        arg: "params".to_string(),
                        reason: e.to_string(),
                    })?
                };
                Self::Open {
                    route: Route::from_parts(name, &params)?,
                }
            }
            "go" => Self::Go {
                action: Action::parse(rest)?,
            },
            "start" => Self::Start,
            "tap" => {
                let mut parts = rest.split_whitespace();
                let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
                    return Err(CommandError::Usage("tap <lat> <lng>").into());
                };
                Self::Tap {
                    at: Coordinate::new(parse_degrees(lat)?, parse_degrees(lng)?),
                }
            }
            "pan" => {
                let mut parts = rest.split_whitespace();
                let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
                    return Err(CommandError::Usage("pan <lat> <lng>").into());
                };
                Self::Pan {
                    to: Coordinate::new(parse_degrees(lat)?, parse_degrees(lng)?),
                }
            }
            "recenter" => Self::Recenter,
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>").into());
                }
                Self::Set {
                    field: field.parse()?,
                    value: value.trim().to_string(),
                }
            }
            "commit" => Self::Commit,
            "feed" => Self::Feed,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string()).into()),
        };
        Ok(command)
    }
}

impl Action {
    fn parse(rest: &str) -> std::result::Result<Self, CommandError> {
        let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let arg = arg.trim();
        let action = match name {
            "get-started" => Self::GetStarted,
            "sign-in" => Self::SignIn,
            "sign-up" => Self::SignUp,
            "proceed-new" => Self::Proceed(SignInOutcome::NewUser),
            "proceed-returning" => Self::Proceed(SignInOutcome::Returning),
            "forgot-password" => Self::ForgotPassword,
            "vendor" => Self::SelectTab(UserType::Vendor),
            "customer" => Self::SelectTab(UserType::Customer),
            "submit" => Self::Submit,
            "switch-sign-in" => Self::SwitchToSignIn,
            "verify" => Self::Verify(arg.to_string()),
            "continue" => Self::Continue,
            "save-details" => Self::SaveDetails,
            "save-location" => Self::SaveLocation,
            "category" if !arg.is_empty() => Self::Category(arg.to_string()),
            "category" => return Err(CommandError::Usage("go category <name>")),
            "reviews" => Self::Reviews,
            "" => return Err(CommandError::Usage("go <action> [arg]")),
            other => return Err(CommandError::Unknown(format!("go {other}"))),
        };
        Ok(action)
    }
}

fn parse_degrees(raw: &str) -> std::result::Result<f64, CommandError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidArgument {
            arg: raw.to_string(),
            reason: "expected decimal degrees".to_string(),
        })
}

/// Apply a command to the flow and describe the result as JSON.
///
/// `Quit` and `Help` are handled by the caller and return `Value::Null` here.
pub async fn execute(flow: &mut ScreenFlow, command: Command) -> Result<Value> {
    let out = match command {
        Command::Screen => screen(flow),
        Command::Stack => json!(flow.navigator().snapshot()),
        Command::Back => {
            let moved = flow.back();
            json!({"moved": moved, "frame": flow.current()})
        }
        Command::Open { route } => json!(flow.open(route)),
        Command::Go { action } => run_action(flow, action).await?,
        Command::Start => {
            let region = flow.location_start().await?;
            json!({"region": region})
        }
        Command::Tap { at } => {
            flow.location_mut()?.tap(at);
            json!(flow.location()?.projection())
        }
        Command::Pan { to } => {
            let ctl = flow.location_mut()?;
            let panned = match ctl.viewport() {
                Some(viewport) => ctl.pan(viewport.moved_to(to)),
                None => false,
            };
            json!({"panned": panned, "view": flow.location()?.projection()})
        }
        Command::Recenter => {
            let recentered = flow.location_mut()?.recenter();
            json!({"recentered": recentered, "view": flow.location()?.projection()})
        }
        Command::Set { field, value } => {
            flow.location_mut()?.set_field(field, value);
            json!(flow.location()?.draft())
        }
        Command::Commit => json!(flow.location()?.commit()),
        Command::Feed => {
            let feed = flow.home_load_feed().await?;
            json!({
                "products": feed.products.len(),
                "recommended": feed.recommended().len(),
                "categories": feed.categories(),
            })
        }
        Command::Help | Command::Quit => Value::Null,
    };
    Ok(out)
}

fn screen(flow: &ScreenFlow) -> Value {
    let mut out = json!({"frame": flow.current(), "depth": flow.navigator().depth()});
    if let Ok(location) = flow.location() {
        let draft = location.draft();
        let fields: Vec<Value> = AddressField::ALL
            .iter()
            .map(|field| {
                json!({
                    "name": field.to_string(),
                    "placeholder": field.placeholder(),
                    "value": draft.get(*field),
                })
            })
            .collect();
        out["location"] = json!(location.projection());
        out["fields"] = json!(fields);
    }
    if let Some(feed) = flow.home_feed() {
        out["feed"] = json!({
            "products": feed.products.len(),
            "carousel": feed.carousel().iter().map(|p| p.id).collect::<Vec<_>>(),
            "recommended": feed.recommended().iter().map(|p| p.id).collect::<Vec<_>>(),
        });
    }
    out
}

async fn run_action(flow: &mut ScreenFlow, action: Action) -> Result<Value> {
    let frame = match action {
        Action::GetStarted => flow.onboarding_get_started()?,
        Action::SignIn => flow.onboarding_sign_in()?,
        Action::SignUp => flow.sign_in_sign_up()?,
        Action::Proceed(outcome) => flow.sign_in_proceed(outcome)?,
        Action::ForgotPassword => flow.sign_in_forgot_password()?,
        Action::SelectTab(user_type) => {
            flow.sign_up_form()?.select_tab(user_type);
            flow.current()
        }
        Action::Submit => flow.sign_up_submit()?,
        Action::SwitchToSignIn => flow.sign_up_switch_to_sign_in()?,
        Action::Verify(code) => flow.verify_phone_confirm(&code)?,
        Action::Continue => flow.account_created_continue()?,
        Action::SaveDetails => {
            flow.new_user_save_details()?;
            // Entry hook; a denied or missing fix leaves the form usable
            if let Err(e) = flow.location_start().await {
                warn!(error = %e, "Location screen opened without a map");
            }
            flow.current()
        }
        Action::SaveLocation => {
            flow.save_location()?;
            flow.current()
        }
        Action::Category(category) => flow.open_category(category)?,
        Action::Reviews => flow.open_reviews()?,
    };
    Ok(json!(frame))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::catalog::{Catalog, Product};
    use crate::config::FlowConfig;
    use crate::error::{CatalogError, Error, NavigationError};
    use crate::geo::FixedPosition;

    struct NoCatalog;

    #[async_trait]
    impl Catalog for NoCatalog {
        async fn fetch_products(&self) -> std::result::Result<Vec<Product>, CatalogError> {
            Ok(Vec::new())
        }
    }

    fn flow() -> ScreenFlow {
        ScreenFlow::new(
            FlowConfig::default(),
            Arc::new(FixedPosition::new(Coordinate::new(12.90, 77.60))),
            Arc::new(NoCatalog),
        )
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("screen").unwrap(), Command::Screen);
        assert_eq!(
            Command::parse("tap 12.91 77.61").unwrap(),
            Command::Tap {
                at: Coordinate::new(12.91, 77.61)
            }
        );
        assert_eq!(
            Command::parse("set street  MG Road ").unwrap(),
            Command::Set {
                field: AddressField::Street,
                value: "MG Road".into()
            }
        );
        assert_eq!(
            Command::parse("go category men's clothing").unwrap(),
            Command::Go {
                action: Action::Category("men's clothing".into())
            }
        );
        assert_eq!(
            Command::parse(r#"open VerifyYourPhoneNumber {"userType":"Vendor"}"#).unwrap(),
            Command::Open {
                route: Route::VerifyYourPhoneNumber {
                    user_type: UserType::Vendor
                }
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Command::parse("fly"),
            Err(Error::Command(CommandError::Unknown(_)))
        ));
        assert!(matches!(
            Command::parse("tap 12.9"),
            Err(Error::Command(CommandError::Usage(_)))
        ));
        assert!(matches!(
            Command::parse("tap north 77"),
            Err(Error::Command(CommandError::InvalidArgument { .. }))
        ));
        assert!(matches!(
            Command::parse("open Settings"),
            Err(Error::Navigation(NavigationError::UnknownRoute { .. }))
        ));
        assert!(matches!(
            Command::parse("open Menulist"),
            Err(Error::Navigation(NavigationError::MissingParam { .. }))
        ));
    }

    #[tokio::test]
    async fn drives_new_user_to_home() {
        let mut flow = flow();
        for line in [
            "go sign-in",
            "go proceed-new",
            "go save-details",
            "start",
            "tap 12.91 77.61",
            "set flatNo 12B",
            "go save-location",
        ] {
            let command = Command::parse(line).unwrap();
            execute(&mut flow, command).await.unwrap();
        }
        let out = execute(&mut flow, Command::Screen).await.unwrap();
        assert_eq!(out["frame"]["route"], "Home");
        assert_eq!(out["frame"]["params"]["delivery"]["address"]["flatNo"], "12B");
        assert_eq!(out["frame"]["params"]["delivery"]["selection"]["latitude"], 12.91);
    }

    #[tokio::test]
    async fn entering_location_resolves_and_lists_fields() {
        let mut flow = flow();
        for line in ["go sign-in", "go proceed-new", "go save-details"] {
            execute(&mut flow, Command::parse(line).unwrap()).await.unwrap();
        }
        let out = execute(&mut flow, Command::Screen).await.unwrap();
        assert_eq!(out["location"]["phase"], "resolved");
        assert_eq!(out["fields"][0]["name"], "flatNo");
        assert_eq!(out["fields"][0]["placeholder"], "Flat No / Door No");
        assert_eq!(out["fields"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn pan_keeps_zoom_and_selection() {
        let mut flow = flow();
        for line in ["go sign-in", "go proceed-new", "go save-details", "tap 12.91 77.61"] {
            execute(&mut flow, Command::parse(line).unwrap()).await.unwrap();
        }
        let out = execute(&mut flow, Command::parse("pan 13.0 78.0").unwrap())
            .await
            .unwrap();
        assert_eq!(out["panned"], true);
        assert_eq!(out["view"]["viewport"]["latitude"], 13.0);
        assert_eq!(out["view"]["viewport"]["latitudeDelta"], 0.01);
        assert_eq!(out["view"]["selection"]["latitude"], 12.91);

        let out = execute(&mut flow, Command::Recenter).await.unwrap();
        assert_eq!(out["view"]["viewport"]["latitude"], 12.90);
    }

    #[tokio::test]
    async fn screen_summarizes_loaded_feed() {
        let mut flow = flow();
        execute(&mut flow, Command::parse("go get-started").unwrap()).await.unwrap();
        let out = execute(&mut flow, Command::Screen).await.unwrap();
        assert!(out.get("feed").is_some_and(|f| f["products"] == 0));
    }

    #[tokio::test]
    async fn back_on_entry_reports_no_move() {
        let mut flow = flow();
        let out = execute(&mut flow, Command::Back).await.unwrap();
        assert_eq!(out["moved"], false);
        assert_eq!(out["frame"]["route"], "Onboarding");
    }
}
