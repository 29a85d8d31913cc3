//! Config command implementation

use finsight_core::{Config, ConfigSource};

pub fn cmd_config(config: &Config, source: &ConfigSource) {
    println!();
    println!("⚙️  Finsight Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Source: {}", source);
    println!();
    println!("   Free tier limits");
    println!("     Transactions:      {}", config.quota.free_transactions);
    println!("     Advisor questions: {}", config.quota.free_chat_messages);
    println!();
    println!("   Budgets");
    println!("     Near limit above:  {}%", config.budgets.near_limit_percent);
    println!("     Alert above:       {}%", config.budgets.alert_percent);
    println!();
    println!("   Dashboard");
    println!("     Top categories:    {}", config.insights.top_limit);
    println!("     Recent rows:       {}", config.insights.recent_limit);
    println!();
    println!("   Delays");
    println!("     Upload:            {} ms", config.delays.upload.as_millis());
    println!("     Sample data:       {} ms", config.delays.sample.as_millis());
    println!("     Advisor reply:     {} ms", config.delays.chat_reply.as_millis());
    println!();
    println!("   Sample data");
    println!("     Window:            {} days", config.fixtures.window_days);
    match config.fixtures.seed {
        Some(seed) => println!("     Seed:              {}", seed),
        None => println!("     Seed:              (random)"),
    }
    println!();
}
