use std::sync::Arc;

use async_trait::async_trait;
use buildtrack_core::{
    aggregation::{document_summary, financial_summary},
    dates,
    domain::{AcceptanceTask, PcccMaterial, Project},
    inventory::WarehouseStats,
    qaqc::readiness_summary,
};
use itertools::Itertools;
use serde_json::json;
use time::Date;

use crate::domain::{
    ports::{
        inbound::AssistantService,
        outbound::{find_record, load_all, CompletionClient, RecordStore},
    },
    AssistantError,
};

const NOT_CONFIGURED: &str =
    "The AI assistant is not configured. Set GEMINI_API_KEY to enable it.";

/// Which use case a prompt belongs to, for fallback texts and logging.
#[derive(Debug, Clone, Copy)]
enum Topic {
    Chat,
    ProjectRisks,
    TaskSuggestions,
    PcccStock,
    Qaqc,
}

impl Topic {
    fn fallback(self) -> &'static str {
        match self {
            Topic::Chat => "The assistant is having connection problems. Please try again.",
            Topic::ProjectRisks => {
                "An error occurred while contacting the AI assistant. Please try again later."
            }
            Topic::TaskSuggestions => "Could not fetch task suggestions.",
            Topic::PcccStock => "Could not analyze the PCCC warehouse data.",
            Topic::Qaqc => "Could not analyze the QA/QC checklist.",
        }
    }
}

pub struct AssistantServiceImpl<S, C> {
    store: Arc<S>,
    client: Arc<C>,
}

impl<S: RecordStore, C: CompletionClient> AssistantServiceImpl<S, C> {
    pub fn new(store: Arc<S>, client: Arc<C>) -> Self {
        Self { store, client }
    }

    async fn ask(&self, topic: Topic, prompt: String) -> String {
        if !self.client.is_configured() {
            return NOT_CONFIGURED.to_string();
        }

        match self.client.complete(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(?topic, error = %e, "Completion request failed");
                topic.fallback().to_string()
            }
        }
    }

    async fn project(&self, project_id: &str) -> Result<Project, AssistantError> {
        find_record::<Project>(&*self.store, project_id)
            .await?
            .ok_or_else(|| AssistantError::ProjectNotFound(project_id.to_string()))
    }
}

fn project_context(project: &Project) -> String {
    format!(
        "Project name: {}\n\
         Status: {}\n\
         Progress: {}%\n\
         Budget: {}\n\
         Spent: {}\n\
         Manager: {}\n\
         Description: {}\n\
         Number of tasks: {}\n\
         Number of workers: {}",
        project.name,
        project.status,
        project.progress,
        project.budget,
        project.spent,
        project.manager,
        project.description,
        project.tasks.len(),
        project.workers.len(),
    )
}

fn portfolio_context(projects: &[Project]) -> String {
    format!(
        "Total projects in the system: {}. Projects: {}.",
        projects.len(),
        projects.iter().map(|p| p.name.as_str()).join(", ")
    )
}

fn risk_prompt(project: &Project) -> String {
    let finance = financial_summary(project);
    let docs = document_summary(project);
    let drafts = if docs.drafts.is_empty() {
        "none".to_string()
    } else {
        docs.drafts.join(", ")
    };
    let materials = project
        .materials
        .iter()
        .map(|m| json!({ "name": m.name, "status": m.status }))
        .collect::<Vec<_>>();

    format!(
        "You are an expert construction project manager. Analyze the project data below \
         and write a short report (under 300 words).\n\n\
         Project:\n\
         - Name: {name}\n\
         - Status: {status}\n\
         - Progress: {progress}%\n\
         - Finance: {paid} payment stage(s) paid, {overdue} overdue, {pending} outstanding. Total budget: {budget}.\n\
         - Documents: {total} on file. Drafts not yet finalized: {drafts}.\n\
         - Number of tasks: {tasks}\n\
         - Site materials: {materials}\n\n\
         Requirements:\n\
         1. Assess the overall situation, including cash flow and document compliance.\n\
         2. Point out potential risks (finance, schedule, documents or materials).\n\
         3. Propose 2-3 concrete actions for the manager.",
        name = project.name,
        status = project.status,
        progress = project.progress,
        paid = finance.paid_stages,
        overdue = finance.overdue_stages,
        pending = finance.pending_amount,
        budget = project.budget,
        total = docs.total,
        tasks = project.tasks.len(),
        materials = serde_json::Value::Array(materials),
    )
}

fn stock_prompt(materials: &[PcccMaterial], today: Date) -> String {
    let stats = WarehouseStats::from_materials(materials, today);
    let rows = materials
        .iter()
        .map(|m| {
            json!({
                "name": m.name,
                "available": m.available_quantity,
                "minStock": m.min_stock_level,
                "expiry": m.inspection_expiry,
                "issuedNotInstalled": m.issued_not_installed(),
                "allocatedTo": m
                    .allocated_to
                    .iter()
                    .map(|a| format!("{} to {} ({})", a.quantity, a.project_name, a.status))
                    .join(", "),
            })
        })
        .collect::<Vec<_>>();

    format!(
        "You are an expert in fire protection (PCCC) equipment warehousing. Analyze the \
         stock data below and raise warnings.\n\n\
         Summary: {items} items, {low} low on stock, {expired} past inspection.\n\
         Stock data:\n{rows}\n\n\
         Analysis:\n\
         1. Shortage forecast: compare available quantity with the minimum stock level.\n\
         2. Equipment warnings: check inspection expiry against today ({today}).\n\
         3. Allocation: comment on quantities issued but not yet installed and the risk of loss.\n\
         4. Suggest a list of items to reorder now.\n\n\
         Keep the answer short and use bullet points.",
        items = stats.item_count,
        low = stats.low_stock,
        expired = stats.expired,
        rows = serde_json::Value::Array(rows),
        today = dates::format_date(today),
    )
}

fn qaqc_prompt(tasks: &[AcceptanceTask]) -> String {
    let readiness = readiness_summary(tasks);
    let tally = readiness
        .by_status
        .iter()
        .map(|t| format!("{}: {}", t.status, t.count))
        .join(", ");
    let checklist = tasks
        .iter()
        .map(|t| {
            json!({
                "title": t.title,
                "standard": t.standard_ref,
                "status": t.status,
                "docCount": t.documents.len(),
                "documents": t.documents.iter().map(|d| d.name.as_str()).join(", "),
                "notes": t.notes,
            })
        })
        .collect::<Vec<_>>();

    format!(
        "You are a QA/QC and fire safety approval expert reviewing the acceptance file \
         before the fire police inspection.\n\n\
         Status counts: {tally}. Records approved or in progress without evidence: {missing}.\n\
         Current acceptance items:\n{checklist}\n\n\
         Analysis:\n\
         1. Missing records: items Approved or In Progress without supporting documents.\n\
         2. Standards: for each item, remind the key technical requirements of the referenced \
            standard that are often overlooked.\n\
         3. Inspection hot spots: items inspectors usually check most strictly.\n\
         4. Overall readiness of the file (Low/Medium/High).\n\n\
         Keep the answer short and flag important items clearly.",
        missing = readiness.missing_evidence.len(),
        checklist = serde_json::Value::Array(checklist),
    )
}

#[async_trait]
impl<S: RecordStore, C: CompletionClient> AssistantService for AssistantServiceImpl<S, C> {
    async fn chat(
        &self,
        message: &str,
        project_id: Option<&str>,
    ) -> Result<String, AssistantError> {
        let context = match project_id {
            Some(id) => project_context(&self.project(id).await?),
            None => {
                let projects: Vec<Project> = load_all(&*self.store).await?;
                portfolio_context(&projects)
            }
        };

        let prompt = format!(
            "[Context of what the user is currently looking at:\n{context}]\n\n\
             You are an AI assistant specialized in construction and project management. \
             Answer the user's question briefly, professionally and helpfully. \
             Use the context above to be specific.\n\n\
             User: \"{message}\""
        );
        Ok(self.ask(Topic::Chat, prompt).await)
    }

    async fn analyze_project_risks(&self, project_id: &str) -> Result<String, AssistantError> {
        let project = self.project(project_id).await?;
        Ok(self.ask(Topic::ProjectRisks, risk_prompt(&project)).await)
    }

    async fn suggest_tasks(&self, project_description: &str) -> Result<String, AssistantError> {
        let prompt = format!(
            "Based on the following construction project description: \"{project_description}\".\n\
             List the 5 most important work items to carry out, in chronological order.\n\
             Return a short bullet list."
        );
        Ok(self.ask(Topic::TaskSuggestions, prompt).await)
    }

    async fn analyze_pccc_stock(&self, today: Date) -> Result<String, AssistantError> {
        let materials: Vec<PcccMaterial> = load_all(&*self.store).await?;
        Ok(self.ask(Topic::PcccStock, stock_prompt(&materials, today)).await)
    }

    async fn analyze_qaqc(&self) -> Result<String, AssistantError> {
        let tasks: Vec<AcceptanceTask> = load_all(&*self.store).await?;
        Ok(self.ask(Topic::Qaqc, qaqc_prompt(&tasks)).await)
    }
}
