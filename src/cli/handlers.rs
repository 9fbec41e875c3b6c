use anyhow::{Result, anyhow, bail};
use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;
use std::str::FromStr;

use crate::cli::args::{GoalCommands, MenuCommands, ShoppingCommands};
use crate::config::AppConfig;
use crate::db::repository::{EntryRepo, MenuRepo, ShoppingRepo};
use crate::engine;
use crate::models::{MealSlot, MenuDay, Metric, MilestoneStatus, ProgressSummary, Rarity};
use crate::utils::format::{format_minutes, format_value, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! print_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        print!("\x1b[0m");
    }};
}

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const MAGENTA: &str = "\x1b[35m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const MINT: &str = "\x1b[38;2;94;186;125m";

fn rarity_color(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => DIM,
        Rarity::Rare => CYAN,
        Rarity::Epic => MAGENTA,
        Rarity::Legendary => AMBER,
    }
}

// ─── Shared helpers ──────────────────────────────────────────────────────────

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn display_amount(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Meditation => format_minutes(value),
        _ => format!("{} {}", format_value(value), metric.unit()),
    }
}

/// Load one metric's history and run the full derivation for `on` (usually
/// today). A bad goal configuration surfaces as an error pointing the user
/// at `goal set`.
fn summarize(
    conn: &Connection,
    config: &AppConfig,
    metric: Metric,
    on: NaiveDate,
) -> Result<ProgressSummary> {
    let goal = config.tracker(metric).goal();
    let entries = EntryRepo::get_all(conn, metric)?;
    let catalog = engine::catalog_for(metric, &goal);

    let summary = engine::evaluate(&entries, &goal, on, &catalog).map_err(|e| {
        anyhow!(
            "{} goal is misconfigured ({}). Fix it with: nourish goal set {} <target>",
            metric.display_name(),
            e,
            metric.as_str()
        )
    })?;

    if summary.malformed_entries > 0 {
        log::warn!(
            "{} malformed {} entries were skipped",
            summary.malformed_entries,
            metric.as_str()
        );
    }
    Ok(summary)
}

fn menu_day_today() -> MenuDay {
    match today().weekday() {
        chrono::Weekday::Mon => MenuDay::Monday,
        chrono::Weekday::Tue => MenuDay::Tuesday,
        chrono::Weekday::Wed => MenuDay::Wednesday,
        chrono::Weekday::Thu => MenuDay::Thursday,
        chrono::Weekday::Fri => MenuDay::Friday,
        chrono::Weekday::Sat => MenuDay::Saturday,
        chrono::Weekday::Sun => MenuDay::Sunday,
    }
}

// ─── Overview (default command) ──────────────────────────────────────────────

pub fn handle_overview(conn: &Connection, config: &AppConfig) -> Result<()> {
    let now = today();
    println!();
    println_colored!(MINT, "  Today — {}", now.format("%A, %B %-d"));
    println!();

    for metric in Metric::all() {
        let target = config.tracker(metric).daily_target;
        let summary = summarize(conn, config, metric, now)?;
        let bar = progress_bar(summary.today_value, target, 12);
        let streak_note = if summary.streak.current > 0 {
            format!("  streak {}", summary.streak.current)
        } else {
            String::new()
        };
        println!(
            "  {:<11} {}  {:>10} / {:<8} {:>4}%{}",
            metric.display_name(),
            bar,
            format_value(summary.today_value),
            display_amount(metric, target),
            summary.percent_of_goal.min(999.0).round() as i64,
            streak_note
        );
    }

    let planned: Vec<_> = MenuRepo::get_week(conn)?
        .into_iter()
        .filter(|m| m.day == menu_day_today())
        .collect();
    if !planned.is_empty() {
        println!();
        println_colored!(MINT, "  On the menu today");
        for meal in &planned {
            println!("  {:<11} {}", meal.slot.display_name(), meal.dish);
        }
    }

    let pending = ShoppingRepo::count_pending(conn)?;
    if pending > 0 {
        println!();
        println_colored!(DIM, "  Shopping list: {} open items", pending);
    }
    println!();
    Ok(())
}

// ─── Log ─────────────────────────────────────────────────────────────────────

pub fn handle_log(
    conn: &Connection,
    config: &AppConfig,
    metric_str: &str,
    value: f64,
    date: Option<&str>,
) -> Result<()> {
    let metric = Metric::from_str(metric_str)
        .map_err(|_| anyhow!("Unknown metric '{}'. Use: water, weight, meditation", metric_str))?;
    if value < 0.0 || !value.is_finite() {
        bail!("Value must be a non-negative number");
    }

    let day = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| anyhow!("Bad date '{}'. Expected YYYY-MM-DD", raw))?,
        None => today(),
    };
    let day_str = day.format("%Y-%m-%d").to_string();

    let previous = EntryRepo::get_for_date(conn, metric, &day_str)?;
    EntryRepo::upsert(conn, metric, &day_str, value)?;

    match previous {
        Some(old) => println_colored!(
            AMBER,
            "  ✓ {} for {}: {} (was {})",
            metric.display_name(),
            day_str,
            display_amount(metric, value),
            display_amount(metric, old)
        ),
        None => println_colored!(
            GREEN,
            "  ✓ {} for {}: {}",
            metric.display_name(),
            day_str,
            display_amount(metric, value)
        ),
    }

    // Quick feedback against the goal, only meaningful when logging today.
    if day == today() {
        let summary = summarize(conn, config, metric, day)?;
        let target = config.tracker(metric).daily_target;
        if summary.percent_of_goal >= 100.0 {
            println_colored!(GREEN, "  Goal met — {}% of {}", summary.percent_of_goal.round(), display_amount(metric, target));
        } else {
            println_colored!(
                DIM,
                "  {}% of {} — {} to go",
                summary.percent_of_goal.round(),
                display_amount(metric, target),
                display_amount(metric, (target - summary.today_value).max(0.0))
            );
        }
        if summary.streak.current > 1 {
            println_colored!(MINT, "  {} days in a row", summary.streak.current);
        }
    } else {
        let entries = EntryRepo::get_all(conn, metric)?;
        let day_total = engine::today_value(&entries, day);
        let pct = engine::percent_of_goal(day_total, config.tracker(metric).daily_target)?;
        println_colored!(
            DIM,
            "  {} logged for {} ({}% of goal)",
            display_amount(metric, day_total),
            day_str,
            pct.round()
        );
    }
    Ok(())
}

// ─── Goals ───────────────────────────────────────────────────────────────────

pub fn handle_goal(config: &mut AppConfig, action: &GoalCommands) -> Result<()> {
    match action {
        GoalCommands::Show => {
            println!();
            println_colored!(MINT, "  Daily goals");
            println!();
            for metric in Metric::all() {
                let tracker = config.tracker(metric);
                let window = match tracker.evaluation_window {
                    Some(days) => format!("  window {}d", days),
                    None => String::new(),
                };
                println!(
                    "  {:<11} {}{}",
                    metric.display_name(),
                    display_amount(metric, tracker.daily_target),
                    window
                );
            }
            println!();
        }
        GoalCommands::Set {
            metric,
            target,
            window,
            clear_window,
        } => {
            let metric = Metric::from_str(metric)
                .map_err(|_| anyhow!("Unknown metric '{}'. Use: water, weight, meditation", metric))?;

            let tracker = config.tracker_mut(metric);
            let mut updated = tracker.clone();
            updated.daily_target = *target;
            if *clear_window {
                updated.evaluation_window = None;
            } else if window.is_some() {
                updated.evaluation_window = *window;
            }
            updated.goal().validate()?;

            *tracker = updated;
            config.save()?;
            println_colored!(
                GREEN,
                "  ✓ {} goal set to {}",
                metric.display_name(),
                display_amount(metric, *target)
            );
        }
    }
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(
    conn: &Connection,
    config: &AppConfig,
    week: bool,
    metric: Option<&str>,
    json: bool,
) -> Result<()> {
    let now = today();
    let metrics = match metric {
        Some(raw) => vec![
            Metric::from_str(raw)
                .map_err(|_| anyhow!("Unknown metric '{}'. Use: water, weight, meditation", raw))?,
        ],
        None => Metric::all(),
    };

    if json {
        let mut out = serde_json::Map::new();
        for m in &metrics {
            let summary = summarize(conn, config, *m, now)?;
            out.insert(m.as_str().to_string(), serde_json::to_value(&summary)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println_colored!(MINT, "  Statistics");
    for m in metrics {
        let tracker = config.tracker(m);
        let summary = summarize(conn, config, m, now)?;

        println!();
        println_colored!(BOLD, "  {}", m.display_name());
        println!(
            "  Today:       {} of {}  ({}%)",
            display_amount(m, summary.today_value),
            display_amount(m, tracker.daily_target),
            summary.percent_of_goal.round()
        );
        println!(
            "  Streak:      {} days current  |  {} days best",
            summary.streak.current, summary.streak.best
        );
        println!(
            "  Perfect:     {} days all-time  |  {} pts earned",
            summary.perfect_days, summary.total_reward_points
        );
        if summary.malformed_entries > 0 {
            println_colored!(
                AMBER,
                "  Skipped:     {} malformed entries",
                summary.malformed_entries
            );
        }

        if week {
            let goal = tracker.goal();
            let grid = engine::week_grid(&EntryRepo::get_all(conn, m)?, &goal, now, 7)?;
            print!("  Last 7 days: ");
            for day in &grid {
                let ratio = day.value / goal.daily_target;
                if day.goal_met {
                    print_colored!(GREEN, "● ");
                } else if ratio >= 0.75 {
                    print_colored!(AMBER, "◕ ");
                } else if ratio >= 0.25 {
                    print_colored!(AMBER, "◑ ");
                } else {
                    print_colored!(DIM, "○ ");
                }
            }
            println!();
        }
    }
    println!();
    Ok(())
}

// ─── Milestones ──────────────────────────────────────────────────────────────

fn print_milestone(status: &MilestoneStatus) {
    let color = rarity_color(status.rarity);
    if status.achieved {
        print_colored!(GREEN, "  ✓ ");
    } else {
        print_colored!(DIM, "  ◌ ");
    }
    print!("{:<18}", status.title);
    print_colored!(color, " {:<9}", status.rarity.as_str());
    print!("  +{:<4}", status.reward_points);
    if status.achieved {
        println!();
    } else {
        println_colored!(
            DIM,
            " {} {}%",
            progress_bar(status.progress_percent, 100.0, 5),
            status.progress_percent.round()
        );
    }
}

pub fn handle_milestones(conn: &Connection, config: &AppConfig, metric: Option<&str>) -> Result<()> {
    let now = today();
    let metrics = match metric {
        Some(raw) => vec![
            Metric::from_str(raw)
                .map_err(|_| anyhow!("Unknown metric '{}'. Use: water, weight, meditation", raw))?,
        ],
        None => Metric::all(),
    };

    println!();
    let mut grand_total = 0u32;
    for m in metrics {
        let summary = summarize(conn, config, m, now)?;
        grand_total += summary.total_reward_points;

        println_colored!(
            MINT,
            "  {} — {} pts",
            m.display_name(),
            summary.total_reward_points
        );
        for status in &summary.milestones {
            print_milestone(status);
        }
        println!();
    }
    println_colored!(BOLD, "  Total reward points: {}", grand_total);
    println!();
    Ok(())
}

// ─── Plate guide ─────────────────────────────────────────────────────────────

pub fn handle_plate() -> Result<()> {
    let sections: [(&str, &str, &str); 3] = [
        (
            "Half",
            "Vegetables & fruit",
            "leafy greens, broccoli, peppers, berries",
        ),
        (
            "Quarter",
            "Protein",
            "beans, lentils, fish, eggs, tofu, poultry",
        ),
        (
            "Quarter",
            "Whole grains",
            "oats, brown rice, quinoa, whole-wheat bread",
        ),
    ];

    println!();
    println_colored!(MINT, "  The balanced plate");
    println!();
    for (share, group, examples) in &sections {
        print_colored!(BOLD, "  {:<8}", share);
        print!(" {:<18}", group);
        println_colored!(DIM, " {}", examples);
    }
    println!();
    println_colored!(DIM, "  Drink water with every meal; keep added sugar off the plate.");
    println_colored!(DIM, "  Plan portions with `nourish menu`, track intake with `nourish log`.");
    println!();
    Ok(())
}

// ─── Menu ────────────────────────────────────────────────────────────────────

pub fn handle_menu(conn: &Connection, action: &MenuCommands) -> Result<()> {
    match action {
        MenuCommands::Show => {
            let week = MenuRepo::get_week(conn)?;
            println!();
            if week.is_empty() {
                println_colored!(DIM, "  No menu planned. Add one with `nourish menu set`.");
                println!();
                return Ok(());
            }
            println_colored!(MINT, "  Weekly menu");
            println!();
            for day in MenuDay::all() {
                let meals: Vec<_> = week.iter().filter(|m| m.day == day).collect();
                if meals.is_empty() {
                    continue;
                }
                println_colored!(BOLD, "  {}", day.display_name());
                for slot in MealSlot::all() {
                    if let Some(meal) = meals.iter().find(|m| m.slot == slot) {
                        println!("    {:<10} {}", slot.display_name(), meal.dish);
                    }
                }
            }
            println!();
        }
        MenuCommands::Set { day, slot, dish } => {
            let day = MenuDay::from_str(day)?;
            let slot = MealSlot::from_str(slot)?;
            MenuRepo::set(conn, day, slot, dish)?;
            println_colored!(
                GREEN,
                "  ✓ {} {}: {}",
                day.display_name(),
                slot.display_name().to_lowercase(),
                dish
            );
        }
        MenuCommands::Unset { day, slot } => {
            let day = MenuDay::from_str(day)?;
            let slot = MealSlot::from_str(slot)?;
            if MenuRepo::unset(conn, day, slot)? {
                println_colored!(AMBER, "  Removed {} {}", day.display_name(), slot.as_str());
            } else {
                println_colored!(DIM, "  Nothing planned for {} {}", day.display_name(), slot.as_str());
            }
        }
        MenuCommands::Clear => {
            MenuRepo::clear(conn)?;
            println_colored!(AMBER, "  Weekly menu cleared");
        }
    }
    Ok(())
}

// ─── Shopping ────────────────────────────────────────────────────────────────

pub fn handle_shopping(conn: &Connection, action: &ShoppingCommands) -> Result<()> {
    match action {
        ShoppingCommands::List { all } => {
            let items = ShoppingRepo::list(conn, *all)?;
            println!();
            if items.is_empty() {
                println_colored!(GREEN, "  ✓ Shopping list is empty");
                println!();
                return Ok(());
            }
            println_colored!(MINT, "  Shopping list");
            println!();
            for item in &items {
                let qty = item
                    .quantity
                    .as_deref()
                    .map(|q| format!("  ({})", q))
                    .unwrap_or_default();
                if item.done {
                    println_colored!(DIM, "  ✓ {}{}", item.name, qty);
                } else {
                    println!("  ○ {}{}", item.name, qty);
                }
            }
            println!();
        }
        ShoppingCommands::Add { item, qty } => {
            ShoppingRepo::add(conn, item, qty.as_deref())?;
            println_colored!(GREEN, "  ✓ Added {}", item);
        }
        ShoppingCommands::Done { item } => {
            if ShoppingRepo::mark_done(conn, item)? {
                println_colored!(GREEN, "  ✓ {} checked off", item);
            } else {
                println_colored!(RED, "  ✗ No open item named '{}'", item);
            }
        }
        ShoppingCommands::ClearDone => {
            let removed = ShoppingRepo::clear_done(conn)?;
            println_colored!(AMBER, "  Removed {} checked-off items", removed);
        }
    }
    Ok(())
}

// ─── Export ──────────────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, config: &AppConfig, json: bool) -> Result<()> {
    let now = today();
    let week_start = now - chrono::Duration::days(6);

    if json {
        let mut metrics = serde_json::Map::new();
        for m in Metric::all() {
            let summary = summarize(conn, config, m, now)?;
            metrics.insert(m.as_str().to_string(), serde_json::to_value(&summary)?);
        }
        let out = serde_json::json!({
            "date": now.format("%Y-%m-%d").to_string(),
            "metrics": metrics,
            "menu": MenuRepo::get_week(conn)?,
            "shopping": ShoppingRepo::list(conn, false)?,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("# nourish — Weekly Summary");
    println!("# {} to {}", week_start.format("%Y-%m-%d"), now.format("%Y-%m-%d"));

    for m in Metric::all() {
        let tracker = config.tracker(m);
        let goal = tracker.goal();
        let summary = summarize(conn, config, m, now)?;
        let grid = engine::week_grid(&EntryRepo::get_all(conn, m)?, &goal, now, 7)?;

        println!();
        println!("## {} (goal {})", m.display_name(), display_amount(m, tracker.daily_target));
        for day in &grid {
            println!(
                "  {}  {:>8}  {}",
                day.date,
                format_value(day.value),
                progress_bar(day.value, goal.daily_target, 5)
            );
        }
        println!(
            "  Streak: {} days (best: {})  |  Points: {}",
            summary.streak.current, summary.streak.best, summary.total_reward_points
        );
    }

    let week = MenuRepo::get_week(conn)?;
    if !week.is_empty() {
        println!();
        println!("## Menu");
        for meal in &week {
            println!("  {:<10} {:<10} {}", meal.day.as_str(), meal.slot.as_str(), meal.dish);
        }
    }

    let open = ShoppingRepo::list(conn, false)?;
    if !open.is_empty() {
        println!();
        println!("## Shopping");
        for item in &open {
            match item.quantity.as_deref() {
                Some(qty) => println!("  [ ] {} ({})", item.name, qty),
                None => println!("  [ ] {}", item.name),
            }
        }
    }
    Ok(())
}
