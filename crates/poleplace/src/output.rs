use std::net::SocketAddr;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use poleplace_control::Exchange;
use serde::Serialize;

#[derive(Clone, Debug, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// `Vo,V1,Vi` with six decimals, one line per session.
    #[default]
    Csv,
    Json,
    Table,
    Pretty,
}

#[derive(Serialize)]
struct ExchangeOutput {
    vo: f32,
    v1: f32,
    vi: f32,
    request: [i8; 2],
    response: i8,
}

impl From<&Exchange> for ExchangeOutput {
    fn from(exchange: &Exchange) -> Self {
        Self {
            vo: exchange.state.vo,
            v1: exchange.state.v1,
            vi: exchange.vi,
            request: [exchange.request.vo, exchange.request.v1],
            response: exchange.response.vi,
        }
    }
}

/// Print one session line.
pub fn print_exchange(exchange: &Exchange, format: OutputFormat) {
    match format {
        OutputFormat::Csv => println!("{}", csv_line(exchange)),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&ExchangeOutput::from(exchange))
                    .unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["VO", "V1", "VI", "RX", "TX"])
                .add_row(vec![
                    format!("{:.6}", exchange.state.vo),
                    format!("{:.6}", exchange.state.v1),
                    format!("{:.6}", exchange.vi),
                    format!("{} {}", exchange.request.vo, exchange.request.v1),
                    exchange.response.vi.to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "vo={:.6} v1={:.6} vi={:.6} rx=[{}, {}] tx={}",
                exchange.state.vo,
                exchange.state.v1,
                exchange.vi,
                exchange.request.vo,
                exchange.request.v1,
                exchange.response.vi
            );
        }
    }
}

/// The diagnostic line without its newline.
pub fn csv_line(exchange: &Exchange) -> String {
    format!(
        "{:.6},{:.6},{:.6}",
        exchange.state.vo, exchange.state.v1, exchange.vi
    )
}

#[derive(Serialize)]
struct ReplyOutput {
    server: String,
    request: [i8; 2],
    response: i8,
    vi: f32,
}

/// Print the controller's answer as seen by the plant.
pub fn print_reply(
    server: SocketAddr,
    request: [i8; 2],
    response: i8,
    vi: f32,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Csv => println!("{response},{vi:.6}"),
        OutputFormat::Json => {
            let out = ReplyOutput {
                server: server.to_string(),
                request,
                response,
                vi,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SERVER", "TX", "RX", "VI"])
                .add_row(vec![
                    server.to_string(),
                    format!("{} {}", request[0], request[1]),
                    response.to_string(),
                    format!("{vi:.6}"),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "server={server} tx=[{}, {}] rx={response} vi={vi:.6}",
                request[0], request[1]
            );
        }
    }
}

/// Print `(name, value)` pairs.
pub fn print_constants(constants: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Csv => {
            for (name, value) in constants {
                println!("{name},{value}");
            }
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = constants
                .iter()
                .map(|(name, value)| (name.to_string(), serde_json::Value::from(value.as_str())))
                .collect();
            println!(
                "{}",
                serde_json::to_string(&map).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NAME", "VALUE"]);
            for (name, value) in constants {
                table.add_row(vec![name.to_string(), value.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (name, value) in constants {
                println!("{name}={value}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use poleplace_codec::Request;
    use poleplace_control::Controller;

    use super::*;

    #[test]
    fn csv_line_matches_printf_layout() {
        let exchange = Controller::default().evaluate(Request::new(25, 0));
        assert_eq!(csv_line(&exchange), "1.000000,0.000000,-2.914500");
    }

    #[test]
    fn json_output_carries_raw_bytes() {
        let exchange = Controller::default().evaluate(Request::new(25, -1));
        let value = serde_json::to_value(ExchangeOutput::from(&exchange)).unwrap();
        assert_eq!(value["request"], serde_json::json!([25, -1]));
        assert_eq!(value["response"], -72);
    }
}
