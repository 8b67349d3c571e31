use creddypens_core::models::{
    AcademyStatus, Agent, AnalyticsOverview, CostReport, DashboardStats, HiredAgent, InboxTask,
    OrgSkill, Skill, WorkflowRunResult, WorkflowSchedule, WorkflowTemplate,
};
use creddypens_core::{AgentStream, ApiClient, ChatSession, StreamEvent};

use crate::theme::{Theme, THEMES};
use crate::widgets::toast::ToastManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Marketplace,
    Staff,
    Workflows,
    Analytics,
    Inbox,
    Skills,
    Academy,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Dashboard,
            Tab::Marketplace,
            Tab::Staff,
            Tab::Workflows,
            Tab::Analytics,
            Tab::Inbox,
            Tab::Skills,
            Tab::Academy,
            Tab::Help,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Marketplace => "Marketplace",
            Tab::Staff => "Staff",
            Tab::Workflows => "Workflows",
            Tab::Analytics => "Analytics",
            Tab::Inbox => "Inbox",
            Tab::Skills => "Skills",
            Tab::Academy => "Academy",
            Tab::Help => "Help",
        }
    }

    /// Tabs that render the sign-in-required state (and fetch nothing)
    /// without an organization id. Marketplace browsing stays open.
    pub fn org_scoped(&self) -> bool {
        !matches!(self, Tab::Marketplace | Tab::Help)
    }

    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Tab {
        Tab::all().get(i).copied().unwrap_or(Tab::Dashboard)
    }

    pub fn from_key(c: char) -> Option<Tab> {
        match c {
            '1' => Some(Tab::Dashboard),
            '2' => Some(Tab::Marketplace),
            '3' => Some(Tab::Staff),
            '4' => Some(Tab::Workflows),
            '5' => Some(Tab::Analytics),
            '6' => Some(Tab::Inbox),
            '7' => Some(Tab::Skills),
            '8' => Some(Tab::Academy),
            '9' => Some(Tab::Help),
            _ => None,
        }
    }
}

/// Full-screen chat modal state. While this exists, the modal captures all
/// input; any pending stream is abandoned when it is torn down.
pub struct ChatModal {
    pub session: ChatSession,
    pub input: String,
    pub stream: Option<AgentStream>,
    pub agent_role: String,
    pub agent_department: String,
}

impl ChatModal {
    pub fn open(agent_code: &str, role: &str, department: &str) -> Self {
        let mut session = ChatSession::new(agent_code);
        session.push_agent_note(format!(
            "{} reporting for duty. I am ready to assist. What would you like me to work on?",
            agent_code
        ));
        Self {
            session,
            input: String::new(),
            stream: None,
            agent_role: role.to_string(),
            agent_department: department.to_string(),
        }
    }

    /// Abort any in-flight stream (silent by contract).
    pub fn abandon_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.abort();
        }
        self.session.cancel();
    }

    /// Drain ready stream events into the session. Returns true when a
    /// terminal event arrived (the caller refreshes usage stats).
    pub fn drain_stream(&mut self) -> bool {
        let Some(stream) = self.stream.as_mut() else {
            return false;
        };

        let mut finished = false;
        while let Some(event) = stream.try_next_event() {
            match event {
                StreamEvent::Token { partial } => self.session.apply_token(partial),
                StreamEvent::Done(done) => {
                    self.session.finish_stream(done);
                    finished = true;
                }
                StreamEvent::Error { message } => {
                    self.session.fail(&message);
                    finished = true;
                }
            }
            if finished {
                break;
            }
        }

        if finished {
            self.stream = None;
        }
        finished
    }
}

/// Per-tab data snapshot fetched by a background refresh task.
pub struct RefreshResult {
    pub connected: bool,
    pub error: Option<String>,
    pub agents: Option<Vec<Agent>>,
    pub staff: Option<Vec<HiredAgent>>,
    pub stats: Option<DashboardStats>,
    pub overview: Option<AnalyticsOverview>,
    pub costs: Option<CostReport>,
    pub tasks: Option<Vec<InboxTask>>,
    pub skills: Option<Vec<Skill>>,
    pub org_skills: Option<Vec<OrgSkill>>,
    pub academy: Option<AcademyStatus>,
    pub templates: Option<Vec<WorkflowTemplate>>,
    pub schedules: Option<Vec<WorkflowSchedule>>,
}

impl RefreshResult {
    fn empty() -> Self {
        Self {
            connected: false,
            error: None,
            agents: None,
            staff: None,
            stats: None,
            overview: None,
            costs: None,
            tasks: None,
            skills: None,
            org_skills: None,
            academy: None,
            templates: None,
            schedules: None,
        }
    }
}

/// Fetch the data the given tab renders. Fetch failures leave the previous
/// snapshot in place; only connectivity loss is surfaced.
pub async fn refresh_for_tab(client: &ApiClient, tab: Tab, authenticated: bool) -> RefreshResult {
    let mut result = RefreshResult::empty();

    match client.health().await {
        Ok(_) => result.connected = true,
        Err(e) => {
            result.error = Some(e.to_string());
            return result;
        }
    }

    if tab.org_scoped() && !authenticated {
        return result;
    }

    match tab {
        Tab::Dashboard => {
            result.stats = client.dashboard_stats().await.ok();
            result.staff = client.list_hired_agents().await.ok();
        }
        Tab::Marketplace => {
            result.agents = client.list_agents(None).await.ok();
        }
        Tab::Staff => {
            result.staff = client.list_hired_agents().await.ok();
        }
        Tab::Workflows => {
            result.templates = client.list_workflow_templates().await.ok();
            result.schedules = client.list_workflow_schedules().await.ok();
        }
        Tab::Analytics => {
            result.overview = client.analytics_overview(30).await.ok();
            result.costs = client.analytics_costs(30).await.ok();
        }
        Tab::Inbox => {
            result.tasks = client.list_inbox_tasks().await.ok();
        }
        Tab::Skills => {
            result.skills = client.list_skills().await.ok();
            result.org_skills = client.list_org_skills().await.ok();
        }
        Tab::Academy => {
            result.academy = client.academy_status().await.ok();
        }
        Tab::Help => {}
    }

    result
}

pub struct App {
    pub running: bool,
    pub current_tab: Tab,
    pub theme_index: usize,
    pub selected_index: usize,
    pub status_message: Option<String>,
    pub connected: bool,
    pub last_error: Option<String>,
    pub authenticated: bool,

    pub agents: Vec<Agent>,
    pub staff: Vec<HiredAgent>,
    pub stats: Option<DashboardStats>,
    pub overview: Option<AnalyticsOverview>,
    pub costs: Option<CostReport>,
    pub tasks: Vec<InboxTask>,
    pub skills: Vec<Skill>,
    pub org_skills: Vec<OrgSkill>,
    pub academy: Option<AcademyStatus>,
    pub templates: Vec<WorkflowTemplate>,
    pub schedules: Vec<WorkflowSchedule>,

    pub workflow_running: bool,
    pub workflow_result: Option<WorkflowRunResult>,
    pub workflow_error: Option<String>,

    pub chat: Option<ChatModal>,
    pub toasts: ToastManager,
}

impl App {
    pub fn new(authenticated: bool) -> Self {
        Self {
            running: true,
            current_tab: Tab::Dashboard,
            theme_index: 0,
            selected_index: 0,
            status_message: None,
            connected: false,
            last_error: None,
            authenticated,

            agents: Vec::new(),
            staff: Vec::new(),
            stats: None,
            overview: None,
            costs: None,
            tasks: Vec::new(),
            skills: Vec::new(),
            org_skills: Vec::new(),
            academy: None,
            templates: Vec::new(),
            schedules: Vec::new(),

            workflow_running: false,
            workflow_result: None,
            workflow_error: None,

            chat: None,
            toasts: ToastManager::new(),
        }
    }

    pub fn theme(&self) -> &'static Theme {
        &THEMES[self.theme_index % THEMES.len()]
    }

    pub fn next_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % THEMES.len();
        self.status_message = Some(format!("Theme: {}", self.theme().name));
    }

    pub fn next_tab(&mut self) {
        self.switch_tab(Tab::from_index(
            (self.current_tab.index() + 1) % Tab::all().len(),
        ));
    }

    pub fn prev_tab(&mut self) {
        let count = Tab::all().len();
        self.switch_tab(Tab::from_index(
            (self.current_tab.index() + count - 1) % count,
        ));
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.selected_index = 0;
    }

    pub fn list_len(&self) -> usize {
        match self.current_tab {
            Tab::Marketplace => self.agents.len(),
            Tab::Staff => self.staff.len(),
            Tab::Inbox => self.tasks.len(),
            Tab::Skills => self.skills.len(),
            Tab::Workflows => self.schedules.len(),
            _ => 0,
        }
    }

    pub fn scroll_down(&mut self) {
        self.selected_index = self.selected_index.saturating_add(1);
        self.clamp_selection();
    }

    pub fn scroll_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        if len > 0 && self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn apply_refresh(&mut self, result: RefreshResult) {
        self.connected = result.connected;
        self.last_error = result.error;

        if let Some(agents) = result.agents {
            self.agents = agents;
        }
        if let Some(staff) = result.staff {
            self.staff = staff;
        }
        if let Some(stats) = result.stats {
            self.stats = Some(stats);
        }
        if let Some(overview) = result.overview {
            self.overview = Some(overview);
        }
        if let Some(costs) = result.costs {
            self.costs = Some(costs);
        }
        if let Some(tasks) = result.tasks {
            self.tasks = tasks;
        }
        if let Some(skills) = result.skills {
            self.skills = skills;
        }
        if let Some(org_skills) = result.org_skills {
            self.org_skills = org_skills;
        }
        if let Some(academy) = result.academy {
            self.academy = Some(academy);
        }
        if let Some(templates) = result.templates {
            self.templates = templates;
        }
        if let Some(schedules) = result.schedules {
            self.schedules = schedules;
        }
        self.clamp_selection();
    }

    /// Whether an agent code is on the hired roster.
    pub fn is_hired(&self, code: &str) -> bool {
        self.staff.iter().any(|h| h.agent.agent_code == code)
    }
}
