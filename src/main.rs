mod display;
mod notify;
mod roster;
mod schedule;
mod store;
mod web;

use display::{print_week_schedule, write_schedule_to_file};
use roster::load_roster;
use schedule::generate_schedule;
use store::{persist_schedule, JsonFileStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let password = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string()); // Default password, change this!
        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

        println!("Starting web server on port {}...", port);
        println!("Access the site at http://localhost:{}", port);

        web::start_server(port, password, data_dir).await?;
        return Ok(());
    }

    // CLI mode: load a roster from CSV, generate one timetable, save it
    let csv_path = args.get(1).map(String::as_str).unwrap_or("subjects.csv");

    println!("Loading subjects from {}...", csv_path);
    let roster = load_roster(csv_path)?;
    println!("Loaded {} subjects", roster.len());

    let schedule = generate_schedule(&roster)?;
    print_week_schedule(&schedule);

    write_schedule_to_file(&schedule, "schedule_week.txt")?;
    println!("\nTimetable saved to schedule_week.txt");

    // Persist failure is reported but the printed timetable stands
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let store = JsonFileStore::new(&data_dir);
    match persist_schedule(&store, &schedule) {
        Ok(id) => println!("Timetable stored with id {}", id),
        Err(err) => eprintln!("Could not store timetable: {}", err),
    }

    Ok(())
}
