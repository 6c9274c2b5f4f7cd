// All model prompt templates for the roadmap module.

/// Weekly-theme roadmap prompt.
/// Replace: {persona_type}, {duration_months}, {start_date}, {end_date}, {week_count}
pub const WEEKLY_PROMPT_TEMPLATE: &str = r#"Create a personalized roadmap for someone with a {persona_type} personality type.
The roadmap should cover {duration_months} month(s) starting from {start_date} and ending on {end_date}.

Structure the roadmap with:
1. Overall goals (short-term and long-term)
2. Weekly themes, where each week has a different focus
3. For each week, 2-3 "quests": specific learning tasks or activities
4. Each quest has a task type, name, time commitment, detailed activity description, and learning resources

Return a JSON object with this EXACT structure:
{
  "overall_goals": {
    "short_term": ["Short term goal 1", "Short term goal 2", "Short term goal 3"],
    "long_term": ["Long term goal 1", "Long term goal 2", "Long term goal 3"]
  },
  "weeks": [
    {
      "week_number": 1,
      "theme": "Theme for Week 1",
      "quests": [
        {
          "task_type": "Learn/Build/Reflect/Collaborate/etc.",
          "task_name": "Specific task name",
          "resources": [
            {"title": "Resource title", "link": "https://resource.link"}
          ],
          "time_commitment": "Time needed (e.g., '1 hour/day (evening)')",
          "activity": "Detailed description of what to do"
        }
      ]
    }
  ]
}

Tailor the content specifically to the {persona_type} personality type.
For the resources, include actual relevant websites, courses, or tutorials that exist.
Make the activities specific, challenging but achievable, and appropriate for the persona type.
For a {duration_months} month roadmap, create {week_count} weeks of content, numbered from 1."#;

/// Daily-card roadmap prompt.
/// Replace: {persona_type}, {duration_months}, {start_date}, {preview_days}
pub const DAILY_PROMPT_TEMPLATE: &str = r#"Create a personalized daily roadmap for a person with the personality type: {persona_type}.
The roadmap covers {duration_months} month(s) starting from {start_date}.

For each day, create a card with 4-5 specific activities or tasks focused on skills, growth, and learning.
Each task has a specific time scheduled from morning to night, with start_time and end_time.

Return a JSON object with this EXACT structure:
{
  "overall_goals": {
    "short_term": ["Short term goal 1", "Short term goal 2", "Short term goal 3"],
    "long_term": ["Long term goal 1", "Long term goal 2", "Long term goal 3"]
  },
  "daily_cards": [
    {
      "date": "YYYY-MM-DD",
      "focus_area": "Focus area for the day",
      "tasks": [
        {
          "title": "Task title",
          "description": "Detailed task description",
          "start_time": "08:00",
          "end_time": "09:30",
          "time_slot": "morning",
          "estimated_time": "90 minutes",
          "priority": 1,
          "resources": ["https://resource1.com", "https://resource2.com"]
        }
      ],
      "reflection_prompt": "A question for reflection at the end of the day"
    }
  ]
}

RULES:
1. Generate cards for exactly {preview_days} consecutive days starting on {start_date}, regardless of the roadmap length
2. "date" is always "YYYY-MM-DD"; "start_time" and "end_time" are always 24-hour "HH:MM", with start_time before end_time
3. "time_slot" is one of: "morning", "afternoon", "evening", "night"
4. "priority" is an integer from 1 (highest) to 5
5. Make each task specific, actionable, and tailored to the {persona_type} personality type"#;
