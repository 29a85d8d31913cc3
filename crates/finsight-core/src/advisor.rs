//! Scripted financial advisor
//!
//! Replies come from a fixed set of templates; nothing here calls a model.
//! Template choice goes through [`ReplyPicker`] so sessions can be seeded and
//! tests can pin the reply.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{Category, SubscriptionTier};

/// Message appended when a free session runs out of questions
pub fn limit_notice(limit: usize) -> String {
    format!(
        "You've reached the free plan limit of {} questions. Upgrade to Premium for unlimited AI advice!",
        limit
    )
}

/// Number of reply templates
pub const REPLY_TEMPLATE_COUNT: usize = 5;

/// Opening message for a new conversation
pub fn greeting(tier: SubscriptionTier) -> String {
    let pitch = match tier {
        SubscriptionTier::Premium => {
            "As a premium member, you get unlimited advanced financial advice!"
        }
        SubscriptionTier::Free => {
            "Ask me about budgeting, saving, or investments. Upgrade to premium for unlimited access!"
        }
    };
    format!("Hello! I'm your AI Financial Advisor. {}", pitch)
}

/// Render reply template `index` (wrapped modulo the template count)
pub fn render_reply(index: usize, user_message: &str) -> String {
    let q = user_message.to_lowercase();
    match index % REPLY_TEMPLATE_COUNT {
        0 => format!(
            "Based on your query about \"{q}\", here are some personalized recommendations: \
             Consider setting aside 20% of your income for savings, diversify your investments \
             across different asset classes, and track your spending patterns monthly."
        ),
        1 => format!(
            "Great question about \"{q}\"! Here's my analysis: Start with an emergency fund \
             covering 3-6 months of expenses, then focus on high-interest debt repayment, and \
             consider low-cost index funds for long-term growth."
        ),
        2 => format!(
            "I understand you're asking about \"{q}\". My suggestion: Create a 50/30/20 budget \
             (needs/wants/savings), automate your savings transfers, and review your \
             subscriptions monthly to eliminate unnecessary expenses."
        ),
        3 => format!(
            "Regarding \"{q}\", here's what I recommend: Maximize employer 401(k) matching \
             first, then contribute to a Roth IRA, and consider tax-loss harvesting for your \
             taxable investments."
        ),
        _ => format!(
            "Thanks for your question about \"{q}\". Here's my advice: Use the debt avalanche \
             method for high-interest debt, negotiate better rates with creditors, and consider \
             a balance transfer card if it saves you money."
        ),
    }
}

/// Chooses which reply template answers a message
pub trait ReplyPicker {
    /// Return a template index in `0..count`
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform random choice from a seedable RNG
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl ReplyPicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        self.rng.gen_range(0..count)
    }
}

/// Always picks the same template
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl ReplyPicker for FixedPicker {
    fn pick(&mut self, count: usize) -> usize {
        if count == 0 {
            0
        } else {
            self.0 % count
        }
    }
}

/// Produce the advisor's answer to a user message
pub fn reply(user_message: &str, picker: &mut dyn ReplyPicker) -> String {
    let index = picker.pick(REPLY_TEMPLATE_COUNT);
    render_reply(index, user_message)
}

/// Budgeting advice shown while creating a budget for a category
pub fn budget_suggestion(category: Category) -> &'static str {
    match category {
        Category::FoodDining => {
            "Consider meal prepping to reduce dining out costs. Aim for 10-15% of your income."
        }
        Category::Transportation => {
            "Use public transport or carpool when possible. Budget around 15-20% of income."
        }
        Category::Shopping => {
            "Create a shopping list and stick to it. Limit impulse purchases to 5% of income."
        }
        Category::Entertainment => {
            "Look for free activities and use streaming services efficiently. Keep under 5% of income."
        }
        Category::BillsUtilities => {
            "Review subscriptions monthly and negotiate better rates. Usually 25-30% of income."
        }
        Category::Healthcare => {
            "Build an HSA if available and shop for insurance. Budget 5-10% of income."
        }
        Category::Education => {
            "Invest in skills that increase earning potential. Allocate 3-5% of income."
        }
        Category::Travel => {
            "Book in advance and use travel rewards. Keep vacation spending under 5% of income."
        }
        Category::Other => {
            "Track miscellaneous expenses carefully and set a strict limit of 5% of income."
        }
        Category::Income | Category::Investment => {
            "Set realistic limits and track expenses regularly."
        }
    }
}
