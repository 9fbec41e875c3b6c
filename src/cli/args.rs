use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "nourish", version, about = "A terminal companion for daily health and nutrition tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record today's measurement for a metric (replaces any earlier value)
    Log {
        /// Metric name (water, weight, meditation)
        metric: String,
        /// Measured value (ml, kg, or minutes)
        value: f64,
        /// Backfill a past day instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show or change daily goals
    Goal {
        #[command(subcommand)]
        action: GoalCommands,
    },
    /// Show progress statistics
    Stats {
        /// Show a dot grid for the last 7 days
        #[arg(long)]
        week: bool,
        /// Limit output to one metric
        #[arg(long)]
        metric: Option<String>,
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List milestones and reward points
    Milestones {
        /// Metric name; omit for all metrics
        metric: Option<String>,
    },
    /// Show the balanced-plate guide
    Plate,
    /// Weekly menu planning
    Menu {
        #[command(subcommand)]
        action: MenuCommands,
    },
    /// Shopping list
    Shopping {
        #[command(subcommand)]
        action: ShoppingCommands,
    },
    /// Export a weekly summary to stdout
    Export {
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// Show the configured goals
    Show,
    /// Set a metric's daily target
    Set {
        /// Metric name
        metric: String,
        /// Daily target (ml, kg, or minutes)
        target: f64,
        /// Trailing window in days for perfect-run milestones (7 or 30)
        #[arg(long)]
        window: Option<u32>,
        /// Remove the evaluation window
        #[arg(long, conflicts_with = "window")]
        clear_window: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MenuCommands {
    /// Show the planned week
    Show,
    /// Plan a dish for a day and meal slot
    Set {
        /// Day of week (monday..sunday)
        day: String,
        /// Meal slot: breakfast, lunch or dinner
        slot: String,
        /// Dish name
        dish: String,
    },
    /// Remove a planned dish
    Unset {
        /// Day of week
        day: String,
        /// Meal slot
        slot: String,
    },
    /// Clear the whole week
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ShoppingCommands {
    /// Show the shopping list
    List {
        /// Include checked-off items
        #[arg(long)]
        all: bool,
    },
    /// Add an item
    Add {
        /// Item name
        item: String,
        /// Quantity note, e.g. "2 bags"
        #[arg(long)]
        qty: Option<String>,
    },
    /// Check off an item by name
    Done {
        /// Item name
        item: String,
    },
    /// Remove checked-off items
    ClearDone,
}
